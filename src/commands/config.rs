use anyhow::Result;
use campaignkit_core::config::ToolkitConfig;
use owo_colors::OwoColorize;

pub fn run(config: &ToolkitConfig) -> Result<()> {
    let config_path = ToolkitConfig::config_path().map_err(|e| anyhow::anyhow!(e))?;
    let time_zone = config.time_zone().map_err(|e| anyhow::anyhow!(e))?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Downloads:  {}", config.download_path().display());
    println!();
    println!("{}", "Settings".bold());
    match &config.timezone {
        Some(_) => println!("  Time zone:  {}", time_zone),
        None => println!("  Time zone:  {} {}", time_zone, "(system)".dimmed()),
    }
    println!("  Page URL:   {}", config.page_url);
    println!("  QR service: {}", config.qr_endpoint);

    Ok(())
}
