use serde::Serialize;

/// Property figures supplied by the caller.
///
/// `price` must be validated as positive before evaluation; the engine itself
/// does not guard against degenerate prices.
#[derive(Debug, Clone, PartialEq)]
pub struct DealInput {
    pub address: Option<String>,
    pub price: f64,
    /// After-repair value.
    pub arv: Option<f64>,
    /// Monthly rent.
    pub rent: Option<f64>,
    pub repairs: Option<f64>,
}

impl DealInput {
    pub fn new(price: f64) -> Self {
        Self {
            address: None,
            price,
            arv: None,
            rent: None,
            repairs: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_arv(mut self, arv: f64) -> Self {
        self.arv = Some(arv);
        self
    }

    pub fn with_rent(mut self, rent: f64) -> Self {
        self.rent = Some(rent);
        self
    }

    pub fn with_repairs(mut self, repairs: f64) -> Self {
        self.repairs = Some(repairs);
        self
    }
}

/// Qualitative rating attached to every metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Warning,
    Bad,
}

impl MetricStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MetricStatus::Good => "good",
            MetricStatus::Warning => "warning",
            MetricStatus::Bad => "bad",
        }
    }
}

/// Every metric the engine knows how to emit, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricKind {
    SeventyPercentRule,
    PriceToArvRatio,
    CapRate,
    OnePercentRule,
    CashOnCashReturn,
    MonthlyCashFlow,
    FlipProfit,
    FlipRoi,
}

impl MetricKind {
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::SeventyPercentRule => "70% Rule Max Offer",
            MetricKind::PriceToArvRatio => "Price-to-ARV Ratio",
            MetricKind::CapRate => "Cap Rate (est)",
            MetricKind::OnePercentRule => "1% Rule",
            MetricKind::CashOnCashReturn => "Cash-on-Cash Return",
            MetricKind::MonthlyCashFlow => "Monthly Cash Flow",
            MetricKind::FlipProfit => "Flip Profit (est)",
            MetricKind::FlipRoi => "Flip ROI",
        }
    }
}

/// One labeled line of the deal breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    #[serde(skip)]
    pub kind: MetricKind,
    pub label: String,
    pub value: String,
    pub status: MetricStatus,
}

impl Metric {
    pub(crate) fn new(kind: MetricKind, value: String, status: MetricStatus) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            value,
            status,
        }
    }
}

/// Rules that move the aggregate score. Informational metrics have no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringRule {
    SeventyPercentRule,
    CapRate,
    OnePercentRule,
    CashOnCash,
    FlipProfit,
}

impl ScoringRule {
    /// Points awarded for each status, as (good, warning, bad).
    pub fn deltas(&self) -> (i16, i16, i16) {
        match self {
            ScoringRule::SeventyPercentRule => (20, 5, -15),
            ScoringRule::FlipProfit => (15, 5, -15),
            ScoringRule::CapRate | ScoringRule::OnePercentRule | ScoringRule::CashOnCash => {
                (15, 5, -10)
            }
        }
    }

    pub fn delta_for(&self, status: MetricStatus) -> i16 {
        let (good, warning, bad) = self.deltas();
        match status {
            MetricStatus::Good => good,
            MetricStatus::Warning => warning,
            MetricStatus::Bad => bad,
        }
    }
}

/// Discrete contribution to the score, kept for auditing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAdjustment {
    pub rule: ScoringRule,
    pub status: MetricStatus,
    pub delta: i16,
}

/// Engine output: ordered metrics and a score clamped to 0..=100.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub metrics: Vec<Metric>,
    pub score: u8,
    pub adjustments: Vec<ScoreAdjustment>,
}

impl ScoreResult {
    pub fn metric(&self, kind: MetricKind) -> Option<&Metric> {
        self.metrics.iter().find(|metric| metric.kind == kind)
    }
}
