use std::env;

use chrono::{NaiveDate, Utc};
use kodoku::config::RouteCatalog;
use kodoku::evaluator::{Tier, critical_node, survival_rate};
use kodoku::risk::{ChokepointRisk, disruption_risk, sample_route};

fn main() {
    let catalog = RouteCatalog::canonical();

    let as_of: NaiveDate = match env::args().nth(1) {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").unwrap_or_else(|e| {
            eprintln!("error: cannot parse date {s:?} as YYYY-MM-DD: {e}");
            std::process::exit(2);
        }),
        None => Utc::now().date_naive(),
    };

    // NDJSON to stdout, one line per distinct chokepoint.
    for name in catalog.chokepoints() {
        let entry = ChokepointRisk::new(name, disruption_risk(name, as_of));
        match serde_json::to_string(&entry) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!("error: failed to serialise {name}: {e}");
                std::process::exit(1);
            }
        }
    }

    // Per-route summary to stderr.
    eprintln!("risk_table: {as_of}, {} routes", catalog.len());
    for route in &catalog.routes {
        let risks = sample_route(route, as_of);
        let survival = survival_rate(&risks);
        let crit = critical_node(&risks).map(|c| c.chokepoint.as_str()).unwrap_or("-");
        eprintln!(
            "  route={:<28}  survival={survival:>5.1}  tier={:<8}  critical={crit}",
            route.id.as_str(),
            Tier::from_survival_rate(survival).as_str(),
        );
    }
}
