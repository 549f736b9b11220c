//! json schedule - configuration in, dated schedule out
use loan_amortization_rs::{LoanConfig, MonthView, ScheduleCalculator, ScheduleView};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LoanConfig::from_json(
        r#"{
            "principal": "20",
            "annualRatePercent": "50",
            "termMonths": 12,
            "startDate": "2024-01-15",
            "overpayments": {
                "4": [{ "amount": "2", "mode": "reduceLoanTerm" }]
            }
        }"#,
    )?;

    let calculator = ScheduleCalculator::new(config);
    let schedule = calculator.schedule()?;

    println!("first month:");
    println!("{}\n", MonthView::from_month(&schedule.months[0]).to_json_pretty()?);

    println!("full schedule:");
    println!("{}", ScheduleView::from_schedule(&schedule).to_json_pretty()?);

    Ok(())
}
