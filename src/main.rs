use anyhow::Result;
use lattice_rs::quant::lattice::LatticeConfig;
use lattice_rs::quant::pricing::binomial_option::BinomialOption;
use lattice_rs::quant::OptionStyle;
use lattice_rs::quant::OptionType;
use lattice_rs::traits::PricerExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  for style in [OptionStyle::European, OptionStyle::American] {
    let config = LatticeConfig::builder()
      .spot(100.0)
      .strike(105.0)
      .maturity(4.0)
      .steps(4)
      .flat_rate(0.05)
      .price_changes(1.2, 0.8)
      .build()?;
    let mut put = BinomialOption::new(config, OptionType::Put, style)?;
    let premium = put.calculate_price();
    info!(?style, premium, "priced 105 put");

    if let Some(tree) = put.payoff_tree() {
      println!("{style:?} put payoff tree:\n{tree:.4}");
    }
    for (level, ratios) in put.hedge_ratios()?.iter().enumerate() {
      println!("hedge ratios at level {}: {ratios:.4}", level + 1);
    }
  }

  Ok(())
}
