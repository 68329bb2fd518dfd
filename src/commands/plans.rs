use anyhow::Result;
use colored::Colorize;
use prospect_pricing::pricing::{Locale, PlanTable};
use std::path::Path;

/// Execute the plans command
pub fn execute(config_path: &Path, locale: Option<&str>) -> Result<()> {
    let table = super::load_plan_table(config_path)?;
    let locale = match locale {
        Some(tag) => tag.parse().map_err(anyhow::Error::msg)?,
        None => table.default_locale(),
    };

    print!("{}", render_plans(&table, locale));
    Ok(())
}

fn render_plans(table: &PlanTable, locale: Locale) -> String {
    let mut out = format!("{}\n", "Plans:".bold());

    for plan in table.plans() {
        let range = match plan.upper_bound {
            Some(upper) => format!("{}-{}", plan.base_prospects, upper),
            None => format!("{}+", plan.base_prospects),
        };
        out.push_str(&format!(
            "  {:<16} {:>8} prospects/day  ${:.2} base, +${:.2} per extra prospect\n",
            plan.label(locale).cyan(),
            range,
            plan.base_cost,
            plan.extra_cost_per_prospect
        ));
    }

    out.push_str(&format!(
        "  {}\n",
        format!("Minimum: {} prospects/day", table.min_prospects()).dimmed()
    ));
    out
}
