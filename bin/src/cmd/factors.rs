//! Factor listing command implementation.

use anyhow::{Result, bail};
use ronda_signals::{FactorInfo, available_factors, create_factor, get_factor_info};

/// List the factors the backtest combines, or describe one by name.
pub(crate) fn list_factors(name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        for factor in available_factors() {
            println!("{}", summary_line(&factor));
            println!("               {}", factor.description);
        }
        return Ok(());
    };

    let factor = create_factor(name)?;
    let Some(info) = get_factor_info(factor.name()) else {
        bail!("factor '{name}' has no registry entry");
    };

    println!("Factor:      {}", info.name);
    println!("Category:    {:?} ({})", info.category, info.category.description());
    println!("Description: {}", info.description);
    println!("Lookback:    {} trading days", factor.lookback());
    println!("Preference:  {}", preference(&info));
    Ok(())
}

fn preference(info: &FactorInfo) -> &'static str {
    if info.higher_is_better { "higher is better" } else { "lower is better" }
}

fn summary_line(info: &FactorInfo) -> String {
    format!(
        "  {:12} {:10} lookback {:>3} days, {}",
        info.name,
        format!("{:?}", info.category),
        info.typical_lookback,
        preference(info)
    )
}
