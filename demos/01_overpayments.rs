//! overpayments - lower the monthly payment or finish the loan sooner
use loan_amortization_rs::{Decimal, EventStore, LoanConfig, Money, Overpayment, ScheduleCalculator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = || {
        LoanConfig::builder()
            .principal(Money::from_major(1_000_000))
            .annual_rate_percent(Decimal::new(35, 1))
            .term_months(60)
    };

    let baseline = ScheduleCalculator::new(base().build()?).schedule()?;
    println!("=== no overpayment ===");
    println!(
        "payment {}, {} months, total due {}\n",
        baseline.initial_payment,
        baseline.months.len(),
        baseline.total_amount_due
    );

    // 10,000 in month 3, spread over the remaining term
    let lower_payment = ScheduleCalculator::new(
        base()
            .add_overpayment(3, Overpayment::reduce_monthly_payment(Money::from_major(10_000))?)
            .build()?,
    );
    let mut events = EventStore::new();
    let schedule = lower_payment.schedule_with_events(&mut events)?;
    println!("=== reduce monthly payment ===");
    println!(
        "payment {} -> {}, {} months, total due {}",
        schedule.initial_payment,
        schedule.final_payment,
        schedule.months.len(),
        schedule.total_amount_due
    );
    println!("{}\n", events.to_json_lines()?);

    // 100,000 in month 3, same payment, shorter loan
    let shorter = ScheduleCalculator::new(
        base()
            .add_overpayment(3, Overpayment::reduce_loan_term(Money::from_major(100_000))?)
            .build()?,
    )
    .schedule()?;
    println!("=== reduce loan term ===");
    println!(
        "payment {}, {} months ({} saved), total due {}",
        shorter.initial_payment,
        shorter.months.len(),
        shorter.months_saved(),
        shorter.total_amount_due
    );

    Ok(())
}
