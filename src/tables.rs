use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    config::TariffConfiguration,
    core::{error::PricingError, period::PeriodKey, price::compose, tariff::DeliveryPrice},
    report::{CurrentPrice, FixedCosts, ForecastReport},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

pub fn build_forecast_table(report: &ForecastReport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Start", "Season", "Period", "Import price"]);
    for point in &report.hourly_prices {
        table.add_row(vec![
            Cell::new(point.time.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(point.time.format("%H:%M")),
            Cell::new(point.season).add_attribute(Attribute::Dim),
            Cell::new(point.period),
            Cell::new(point.price)
                .set_alignment(CellAlignment::Right)
                .fg(report.level_of(point).color()),
        ]);
    }
    if let Some(median_price) = report.median_price {
        table.add_row(vec![
            Cell::new("Median").add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
            Cell::new(median_price).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_current_price_table(current: &CurrentPrice) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Hour", "Season", "Period", "Import price"]);
    table.add_row(vec![
        Cell::new(current.hour),
        Cell::new(current.season),
        Cell::new(current.label),
        Cell::new(current.price).set_alignment(CellAlignment::Right),
    ]);
    table
}

pub fn build_fixed_costs_table(costs: &FixedCosts) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Charge", "Value"]);
    let rows = [
        ("Vaste leveringskosten", costs.fixed_delivery.to_string()),
        ("Vaste belastingvermindering", costs.fixed_tax_reduction.to_string()),
        ("Vaste netbeheerkosten", costs.fixed_grid.to_string()),
        ("Vaste kosten totaal", costs.daily_total.to_string()),
        ("Terugleververgoeding", costs.export_compensation.to_string()),
        ("Terugleverkosten", costs.export_costs.to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value).set_alignment(CellAlignment::Right)]);
    }
    table
}

/// All tariff periods with the delivery and import prices for the configured tier.
pub fn build_periods_table(config: &TariffConfiguration) -> Result<Table, PricingError> {
    let tier = config.tier();
    let mut table = new_table();
    table.set_header(vec!["Key", "Label", "Default delivery", "Import price"]);
    for key in PeriodKey::all() {
        let is_overridden = config.delivery_override(key).is_some();
        table.add_row(vec![
            Cell::new(key),
            Cell::new(key.label()).add_attribute(Attribute::Dim),
            Cell::new(DeliveryPrice::default_for(key).at(tier)).set_alignment(CellAlignment::Right),
            Cell::new(compose(config, key, tier)?.round_to_micros())
                .set_alignment(CellAlignment::Right)
                .fg(if is_overridden { Color::Yellow } else { Color::Reset }),
        ]);
    }
    Ok(table)
}
