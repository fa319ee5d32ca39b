//! Campaigns command - list the campaigns in run order.

use colored::Colorize;
use minefuzz::CampaignKind;

pub fn run(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        let campaigns: Vec<serde_json::Value> = CampaignKind::ORDER
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                serde_json::json!({
                    "position": i + 1,
                    "campaign": kind,
                    "target": kind.signature(),
                    "touches_filesystem": kind.touches_filesystem(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&campaigns)?);
        return Ok(());
    }

    println!("{}", "Campaigns (run order):".yellow().bold());
    for (i, kind) in CampaignKind::ORDER.iter().enumerate() {
        let sandbox = if kind.touches_filesystem() {
            " (sandbox)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  {}. {:10} {}{}",
            i + 1,
            kind.slug().cyan(),
            kind.signature(),
            sandbox
        );
    }

    Ok(())
}
