use super::assumptions::UnderwritingAssumptions;
use super::domain::{
    DealInput, Metric, MetricKind, MetricStatus, ScoreAdjustment, ScoreResult, ScoringRule,
};
use super::format::{currency, percent};

const BASE_SCORE: i16 = 50;

/// Scores a deal with the default underwriting assumptions.
pub fn evaluate(input: &DealInput) -> ScoreResult {
    evaluate_with(input, &UnderwritingAssumptions::default())
}

/// Scores a deal. Metric groups run only when their inputs are present.
pub fn evaluate_with(input: &DealInput, assumptions: &UnderwritingAssumptions) -> ScoreResult {
    let mut card = Scorecard::default();

    if let (Some(arv), Some(repairs)) = (input.arv, input.repairs) {
        flip_value(&mut card, input.price, arv, repairs, assumptions);
    }

    if let Some(rent) = input.rent {
        rental(&mut card, input, rent, assumptions);
    }

    if let (Some(arv), Some(repairs)) = (input.arv, input.repairs) {
        flip_profit(&mut card, input.price, arv, repairs, assumptions);
    }

    card.finish()
}

#[derive(Default)]
struct Scorecard {
    metrics: Vec<Metric>,
    adjustments: Vec<ScoreAdjustment>,
}

impl Scorecard {
    fn push(&mut self, kind: MetricKind, value: String, status: MetricStatus) {
        self.metrics.push(Metric::new(kind, value, status));
    }

    fn apply(&mut self, rule: ScoringRule, status: MetricStatus) {
        self.adjustments.push(ScoreAdjustment {
            rule,
            status,
            delta: rule.delta_for(status),
        });
    }

    fn finish(self) -> ScoreResult {
        let raw: i16 = BASE_SCORE
            + self
                .adjustments
                .iter()
                .map(|adjustment| adjustment.delta)
                .sum::<i16>();

        ScoreResult {
            metrics: self.metrics,
            score: raw.clamp(0, 100) as u8,
            adjustments: self.adjustments,
        }
    }
}

/// `Good` at or above `good`, `Warning` at or above `warning`.
fn rate_at_least(value: f64, good: f64, warning: f64) -> MetricStatus {
    if value >= good {
        MetricStatus::Good
    } else if value >= warning {
        MetricStatus::Warning
    } else {
        MetricStatus::Bad
    }
}

/// `Good` at or below `good`, `Warning` at or below `warning`.
fn rate_at_most(value: f64, good: f64, warning: f64) -> MetricStatus {
    if value <= good {
        MetricStatus::Good
    } else if value <= warning {
        MetricStatus::Warning
    } else {
        MetricStatus::Bad
    }
}

fn flip_value(
    card: &mut Scorecard,
    price: f64,
    arv: f64,
    repairs: f64,
    assumptions: &UnderwritingAssumptions,
) {
    let max_offer = arv * assumptions.max_offer_factor - repairs;
    let stretch_offer = arv * assumptions.stretch_offer_factor - repairs;
    let ratio = price / arv;

    let status = rate_at_most(price, max_offer, stretch_offer);
    card.push(MetricKind::SeventyPercentRule, currency(max_offer), status);
    card.push(
        MetricKind::PriceToArvRatio,
        percent(ratio * 100.0, 1),
        rate_at_most(
            ratio,
            assumptions.max_offer_factor,
            assumptions.stretch_offer_factor,
        ),
    );
    card.apply(ScoringRule::SeventyPercentRule, status);
}

fn rental(
    card: &mut Scorecard,
    input: &DealInput,
    rent: f64,
    assumptions: &UnderwritingAssumptions,
) {
    let price = input.price;
    let net_monthly = rent * assumptions.net_income_ratio();

    let annual_noi = rent * 12.0 * assumptions.net_income_ratio();
    let cap_rate = annual_noi / price * 100.0;
    let status = rate_at_least(cap_rate, 8.0, 5.0);
    card.push(MetricKind::CapRate, percent(cap_rate, 1), status);
    card.apply(ScoringRule::CapRate, status);

    let rent_to_price = rent / price * 100.0;
    let status = rate_at_least(rent_to_price, 1.0, 0.7);
    card.push(MetricKind::OnePercentRule, percent(rent_to_price, 2), status);
    card.apply(ScoringRule::OnePercentRule, status);

    let down_payment = price * assumptions.down_payment_ratio + input.repairs.unwrap_or(0.0);
    let monthly_cash_flow = net_monthly - assumptions.monthly_payment(price);
    let cash_on_cash = monthly_cash_flow * 12.0 / down_payment * 100.0;
    let status = rate_at_least(cash_on_cash, 10.0, 5.0);
    card.push(MetricKind::CashOnCashReturn, percent(cash_on_cash, 1), status);

    let cash_flow_status = if monthly_cash_flow > 200.0 {
        MetricStatus::Good
    } else if monthly_cash_flow > 0.0 {
        MetricStatus::Warning
    } else {
        MetricStatus::Bad
    };
    card.push(
        MetricKind::MonthlyCashFlow,
        currency(monthly_cash_flow),
        cash_flow_status,
    );
    card.apply(ScoringRule::CashOnCash, status);
}

fn flip_profit(
    card: &mut Scorecard,
    price: f64,
    arv: f64,
    repairs: f64,
    assumptions: &UnderwritingAssumptions,
) {
    let selling_costs = arv * assumptions.selling_cost_ratio;
    let profit = arv - price - repairs - selling_costs;
    let roi = profit / (price + repairs) * 100.0;

    let status = rate_at_least(roi, 20.0, 10.0);
    card.push(MetricKind::FlipProfit, currency(profit), status);
    card.push(MetricKind::FlipRoi, percent(roi, 1), status);
    card.apply(ScoringRule::FlipProfit, status);
}
