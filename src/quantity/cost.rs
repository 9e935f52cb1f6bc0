quantity!(
    /// Euro per day, the unit of fixed charges.
    DailyCost, via: f64, suffix: "€/dag", precision: 2
);
