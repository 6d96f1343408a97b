use crate::application::engine::EngineResponse;
use crate::error::Result;
use std::io::Write;

/// Writes computed results as one JSON object per line.
///
/// The three operations produce differently-shaped records, so the report
/// stream is JSON rather than CSV; each line carries an `op` tag naming
/// the operation it answers.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, response: &EngineResponse) -> Result<()> {
        serde_json::to_writer(&mut self.writer, response)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine::MonthlyPaymentOutcome;
    use crate::domain::loan::{LoanCalculator, LoanInputs};
    use crate::domain::money::Money;
    use crate::domain::rates::LoanRates;
    use rust_decimal_macros::dec;

    #[test]
    fn test_writer_tags_and_flattens_payment_outcome() {
        let quote = LoanCalculator::new(LoanRates::default()).quote(&LoanInputs {
            principal: Money::new(dec!(12000)),
            annual_rate_percent: dec!(0),
            term_months: 24,
            has_insurance: false,
            vehicle_price: Money::new(dec!(12000)),
        });
        let response = EngineResponse::MonthlyPayment(MonthlyPaymentOutcome {
            quote,
            calculation_id: Some(5),
        });

        let mut buffer = Vec::new();
        ResponseWriter::new(&mut buffer).write(&response).unwrap();
        let line = String::from_utf8(buffer).unwrap();

        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["op"], "monthly-payment");
        assert_eq!(value["monthlyPayment"], "500");
        assert_eq!(value["calculationId"], 5);
    }
}
