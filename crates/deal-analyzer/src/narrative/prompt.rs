use super::NarrativeContext;
use crate::analysis::format::currency;
use std::fmt::Write as _;

const RESPONSE_SCHEMA: &str = r#"{
  "verdict": "one line verdict (e.g., 'Strong Buy', 'Proceed with Caution', 'Pass')",
  "summary": "2-3 sentence summary of the deal",
  "risks": ["risk 1", "risk 2", "risk 3"],
  "opportunities": ["opportunity 1", "opportunity 2", "opportunity 3"]
}"#;

/// Analyst prompt describing the deal and the computed breakdown.
pub fn build_prompt(context: &NarrativeContext<'_>) -> String {
    let input = context.input;
    let mut prompt = String::from(
        "You are an expert real estate investment analyst. \
         Analyze this deal and provide insights.\n\n",
    );

    let address = input
        .address
        .as_deref()
        .filter(|address| !address.trim().is_empty())
        .unwrap_or("Not specified");
    writeln!(&mut prompt, "Property: {address}").expect("write address");
    writeln!(&mut prompt, "Purchase Price: {}", currency(input.price)).expect("write price");
    if let Some(arv) = input.arv {
        writeln!(&mut prompt, "After Repair Value (ARV): {}", currency(arv)).expect("write arv");
    }
    if let Some(rent) = input.rent {
        writeln!(&mut prompt, "Monthly Rent: {}", currency(rent)).expect("write rent");
    }
    if let Some(repairs) = input.repairs {
        writeln!(&mut prompt, "Estimated Repairs: {}", currency(repairs)).expect("write repairs");
    }

    prompt.push_str("\nComputed metrics:\n");
    for metric in &context.evaluation.metrics {
        writeln!(
            &mut prompt,
            "- {}: {} ({})",
            metric.label,
            metric.value,
            metric.status.label()
        )
        .expect("write metric");
    }
    writeln!(&mut prompt, "Overall score: {}/100", context.score()).expect("write score");

    prompt.push_str("\nRespond in JSON format only:\n");
    prompt.push_str(RESPONSE_SCHEMA);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{evaluate, DealInput};

    #[test]
    fn prompt_lists_present_fields_and_metrics() {
        let input = DealInput::new(250_000.0)
            .with_address("123 Main St, Orlando, FL 32801")
            .with_arv(350_000.0)
            .with_repairs(40_000.0);
        let evaluation = evaluate(&input);

        let prompt = build_prompt(&NarrativeContext::new(&input, &evaluation));

        assert!(prompt.contains("Property: 123 Main St, Orlando, FL 32801"));
        assert!(prompt.contains("Purchase Price: $250,000"));
        assert!(prompt.contains("After Repair Value (ARV): $350,000"));
        assert!(prompt.contains("Estimated Repairs: $40,000"));
        assert!(!prompt.contains("Monthly Rent"));
        assert!(prompt.contains("- 70% Rule Max Offer: $205,000 (bad)"));
        assert!(prompt.contains("- Flip ROI: 11.0% (warning)"));
        assert!(prompt.contains("Overall score: 40/100"));
        assert!(prompt.trim_end().ends_with('}'));
    }

    #[test]
    fn prompt_marks_missing_address() {
        let input = DealInput::new(200_000.0).with_rent(2_000.0);
        let evaluation = evaluate(&input);

        let prompt = build_prompt(&NarrativeContext::new(&input, &evaluation));

        assert!(prompt.contains("Property: Not specified"));
        assert!(prompt.contains("Monthly Rent: $2,000"));
        assert!(prompt.contains("\"opportunities\""));
    }
}
