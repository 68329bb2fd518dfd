use anyhow::Result;
use colored::Colorize;
use prospect_pricing::{
    pricing::{compute_pricing_from_input, BalanceBanner, Locale, PlanTable, QuoteSummary},
    session::Balance,
};
use rust_decimal::Decimal;
use std::path::Path;

/// Execute the quote command
pub fn execute(
    config_path: &Path,
    count: &str,
    balance: Decimal,
    admin: bool,
    locale: Option<&str>,
) -> Result<()> {
    let table = super::load_plan_table(config_path)?;
    let locale = match locale {
        Some(tag) => tag.parse().map_err(anyhow::Error::msg)?,
        None => table.default_locale(),
    };
    let balance = if admin {
        Balance::Unlimited
    } else {
        Balance::Amount(balance)
    };

    print!("{}", render_quote(&table, count, balance, locale));
    Ok(())
}

fn render_quote(table: &PlanTable, count: &str, balance: Balance, locale: Locale) -> String {
    let outcome = compute_pricing_from_input(count, balance.available(), table, locale);
    let summary = QuoteSummary::from_outcome(&outcome, balance);

    let mut out = String::new();
    match &outcome {
        Ok(result) => {
            out.push_str(&format!("{}: {}\n", "Plan".cyan(), result.display_name.bold()));
            out.push_str(&format!(
                "{}: {} ({} extra)\n",
                "Prospects/day".cyan(),
                result.prospects,
                result.extra_prospects
            ));
            out.push_str(&format!("{}: ${:.2}\n", "Total".cyan(), summary.total_cost));
        }
        Err(err) => {
            out.push_str(&format!("{} {}\n", "✗".red(), err));
        }
    }

    out.push_str(&format!("{}: {}\n", "Balance".cyan(), balance));
    let banner = match summary.banner {
        BalanceBanner::Sufficient { remaining: Some(remaining) } => {
            format!("✓ Sufficient balance, ${:.2} remaining", remaining).green()
        }
        BalanceBanner::Sufficient { remaining: None } => "✓ Unlimited balance".green(),
        BalanceBanner::Insufficient { recharge } => {
            format!("✗ Insufficient balance, recharge ${:.2}", recharge).red()
        }
        BalanceBanner::Neutral => "Enter a valid prospect count".dimmed(),
    };
    out.push_str(&format!("{}\n", banner));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_quote_insufficient() {
        colored::control::set_override(false);
        let text = render_quote(
            &PlanTable::observed(),
            "14",
            Balance::Amount(dec!(500)),
            Locale::En,
        );

        assert!(text.contains("Custom"));
        assert!(text.contains("$521.50"));
        assert!(text.contains("recharge $21.50"));
    }

    #[test]
    fn test_render_quote_invalid_input() {
        colored::control::set_override(false);
        let text = render_quote(&PlanTable::observed(), "abc", Balance::Unlimited, Locale::Es);

        assert!(text.contains("Enter a valid prospect count"));
        assert!(!text.contains("Total"));
    }
}
