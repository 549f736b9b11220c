//! quick start - minimal example to get started
use loan_amortization_rs::{LoanConfig, Money, Rate, ScheduleCalculator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a $10,000 personal loan at 8% over a year
    let config = LoanConfig::builder()
        .principal(Money::from_major(10_000))
        .annual_rate(Rate::from_percentage(8))
        .term_months(12)
        .build()?;

    let calculator = ScheduleCalculator::new(config);

    println!("month  opening     principal  interest  closing");
    for month in calculator.generate_schedule()? {
        println!(
            "{:>5}  {:>10}  {:>9}  {:>8}  {:>10}",
            month.payment_number(),
            month.opening_balance().to_string(),
            month.principal_due().to_string(),
            month.interest_due().to_string(),
            month.closing_balance().to_string(),
        );
    }

    println!("\ntotal due: {}", calculator.total_amount_due_over_term()?);

    Ok(())
}
