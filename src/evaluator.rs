use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Route;
use crate::error::KodokuError;
use crate::report::RouteReport;
use crate::risk::ChokepointRisk;
use crate::types::round1;

/// Severity tier of a route, ordered by increasing urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Survival ≥ 90.
    Stable,
    /// 70 ≤ survival < 90.
    Watch,
    /// 50 ≤ survival < 70.
    Warning,
    /// Survival < 50.
    Critical,
}

impl Tier {
    pub fn from_survival_rate(survival_rate: f64) -> Self {
        if survival_rate >= 90.0 {
            Tier::Stable
        } else if survival_rate >= 70.0 {
            Tier::Watch
        } else if survival_rate >= 50.0 {
            Tier::Warning
        } else {
            Tier::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Stable => "stable",
            Tier::Watch => "watch",
            Tier::Warning => "warning",
            Tier::Critical => "critical",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The chokepoint with the highest risk. Ties go to the earliest in route order.
/// `None` only for an empty slice.
pub fn critical_node(risks: &[ChokepointRisk]) -> Option<&ChokepointRisk> {
    // Iterator::max_by returns the last maximum, not the first.
    let mut best: Option<&ChokepointRisk> = None;
    for cand in risks {
        if best.is_none_or(|b| cand.risk > b.risk) {
            best = Some(cand);
        }
    }
    best
}

/// Probability (percent, one decimal) that every chokepoint stays open,
/// treating each chokepoint's disruption as independent.
pub fn survival_rate(risks: &[ChokepointRisk]) -> f64 {
    let product: f64 = risks.iter().map(|r| 1.0 - r.risk / 100.0).product();
    round1(product * 100.0).clamp(0.0, 100.0)
}

/// Dashboard insight text for a route. Every tier names the critical node and
/// quotes its risk; urgency rises with the tier.
pub fn generate_insight(
    route_name: &str,
    survival_rate: f64,
    critical_node: &str,
    disruption: f64,
) -> String {
    let survival = fmt_pct(survival_rate);
    let disruption = fmt_pct(disruption);
    match Tier::from_survival_rate(survival_rate) {
        Tier::Stable => format!(
            "{route_name}の生存確率は極めて安定。\
             最大リスクは{critical_node}（封鎖リスク{disruption}%）だが、\
             現状で直ちに航路変更を要する兆候はない。"
        ),
        Tier::Watch => format!(
            "{route_name}に軽微なリスク圧力が観測されている。\
             {critical_node}（封鎖リスク{disruption}%）周辺での武力衝突を注視し、\
             代替ルートの事前検討を推奨する。"
        ),
        Tier::Warning => format!(
            "警告: {route_name}の生存確率が{survival}%まで低下。\
             半径1500km圏内の紛争激化により、\
             {critical_node}が深刻なボトルネックとなっている\
             （封鎖リスク{disruption}%）。\
             速やかな代替ルートへの切り替えを推奨。"
        ),
        Tier::Critical => format!(
            "【致命的警告】 {route_name}の生存確率が{survival}%まで急落。\
             {critical_node}の機能不全リスク（{disruption}%）が極めて高く、\
             サプライチェーン断絶の危機。\
             直ちに代替航路（例: 喜望峰回り等）を実行せよ。"
        ),
    }
}

/// Percentages always print with one decimal, so 72 reads "72.0".
fn fmt_pct(x: f64) -> String {
    format!("{x:.1}")
}

/// Score one route from its sampled chokepoint risks.
///
/// `risks` must hold exactly one entry per distinct chokepoint, in route order
/// (what [`sample_route`](crate::risk::sample_route) returns).
pub fn evaluate(route: &Route, risks: &[ChokepointRisk]) -> Result<RouteReport, KodokuError> {
    if route.chokepoints.is_empty() || risks.is_empty() {
        return Err(KodokuError::EmptyRoute { route_id: route.id.clone() });
    }
    let expected = route.distinct_chokepoints();
    let matches_route = risks.len() == expected.len()
        && risks.iter().zip(&expected).all(|(r, c)| r.chokepoint == *c);
    if !matches_route {
        return Err(KodokuError::RiskMismatch { route_id: route.id.clone() });
    }

    let critical = critical_node(risks)
        .ok_or_else(|| KodokuError::EmptyRoute { route_id: route.id.clone() })?;
    let survival = survival_rate(risks);
    let tier = Tier::from_survival_rate(survival);
    let insight = generate_insight(&route.name, survival, &critical.chokepoint, critical.risk);

    debug!(
        route = %route.id,
        survival_rate = survival,
        critical_node = %critical.chokepoint,
        %tier,
        "evaluated route"
    );
    if tier == Tier::Critical {
        warn!(route = %route.id, survival_rate = survival, "route in critical tier");
    }

    Ok(RouteReport {
        id: route.id.clone(),
        name: route.name.clone(),
        survival_rate: survival,
        critical_node: critical.chokepoint.clone(),
        max_disruption_risk: critical.risk,
        insight,
    })
}
