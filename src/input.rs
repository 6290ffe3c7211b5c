use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::dates::parse_iso_date;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, StrategyError};

/// fields that must be present and non-empty before a calculation runs
pub const REQUIRED_FIELDS: [&str; 6] = [
    "totalAmount",
    "installments",
    "onTimeFee",
    "returnRate",
    "firstPaymentDate",
    "lumpSumDate",
];

/// calculation request as received over the wire
///
/// Numeric fields may arrive as JSON numbers or as numeric strings; dates are
/// ISO `YYYY-MM-DD` strings. Nothing is interpreted until [`StrategyRequest::parse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_time_fee: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_rate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lump_sum_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postpone_months: Option<Value>,
}

impl StrategyRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(StrategyError::MalformedRequest)
    }

    fn field(&self, name: &str) -> Option<&Value> {
        let value = match name {
            "totalAmount" => &self.total_amount,
            "installments" => &self.installments,
            "onTimeFee" => &self.on_time_fee,
            "returnRate" => &self.return_rate,
            "firstPaymentDate" => &self.first_payment_date,
            "lumpSumDate" => &self.lump_sum_date,
            "postponeMonths" => &self.postpone_months,
            _ => return None,
        };
        value.as_ref().filter(|v| !is_blank(v))
    }

    /// fail on the first required field that is absent, null or an empty string
    pub fn check_required(&self) -> Result<()> {
        match REQUIRED_FIELDS.iter().find(|name| self.field(name).is_none()) {
            Some(&field) => Err(StrategyError::MissingField { field }),
            None => Ok(()),
        }
    }

    /// interpret every field and validate the result
    pub fn parse(&self) -> Result<StrategyInput> {
        self.check_required()?;

        let input = StrategyInput {
            total_amount: parse_money("totalAmount", self.required("totalAmount")?)?,
            installments: parse_count("installments", self.required("installments")?)?,
            on_time_fee: parse_money("onTimeFee", self.required("onTimeFee")?)?,
            return_rate: Rate::from_percentage(parse_decimal(
                "returnRate",
                self.required("returnRate")?,
            )?),
            first_payment_date: parse_date("firstPaymentDate", self.required("firstPaymentDate")?)?,
            lump_sum_date: parse_date("lumpSumDate", self.required("lumpSumDate")?)?,
            postpone_months: match self.field("postponeMonths") {
                Some(value) => parse_count("postponeMonths", value)?,
                None => 0,
            },
        };

        input.validate()?;
        Ok(input)
    }

    fn required(&self, field: &'static str) -> Result<&Value> {
        self.field(field).ok_or(StrategyError::MissingField { field })
    }
}

/// validated calculation input
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyInput {
    pub total_amount: Money,
    pub installments: u32,
    pub on_time_fee: Money,
    /// annual return assumption
    pub return_rate: Rate,
    pub first_payment_date: NaiveDate,
    pub lump_sum_date: NaiveDate,
    /// requested number of installments to defer; may be reduced during calculation
    pub postpone_months: u32,
}

impl StrategyInput {
    pub fn new(
        total_amount: Money,
        installments: u32,
        on_time_fee: Money,
        return_rate: Rate,
        first_payment_date: NaiveDate,
        lump_sum_date: NaiveDate,
    ) -> Self {
        Self {
            total_amount,
            installments,
            on_time_fee,
            return_rate,
            first_payment_date,
            lump_sum_date,
            postpone_months: 0,
        }
    }

    pub fn with_postpone_months(mut self, months: u32) -> Self {
        self.postpone_months = months;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.installments == 0 {
            return Err(StrategyError::InvalidInput {
                field: "installments",
                message: "must be at least 1".to_string(),
            });
        }

        if !self.total_amount.is_positive() {
            return Err(StrategyError::InvalidInput {
                field: "totalAmount",
                message: format!("must be positive, got {}", self.total_amount),
            });
        }

        if self.on_time_fee.is_negative() {
            return Err(StrategyError::InvalidInput {
                field: "onTimeFee",
                message: format!("must not be negative, got {}", self.on_time_fee),
            });
        }

        Ok(())
    }

    /// nominal amount of a single installment
    pub fn installment_amount(&self) -> Money {
        self.total_amount / Decimal::from(self.installments)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn numeric_text(field: &'static str, value: &Value) -> Result<String> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.trim().to_string()),
        other => Err(StrategyError::InvalidNumber {
            field,
            value: other.to_string(),
        }),
    }
}

fn parse_decimal(field: &'static str, value: &Value) -> Result<Decimal> {
    let text = numeric_text(field, value)?;
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| StrategyError::InvalidNumber { field, value: text })
}

fn parse_money(field: &'static str, value: &Value) -> Result<Money> {
    let text = numeric_text(field, value)?;
    Money::from_str_exact(&text).map_err(|_| StrategyError::InvalidNumber { field, value: text })
}

fn parse_count(field: &'static str, value: &Value) -> Result<u32> {
    let text = numeric_text(field, value)?;
    let count = match value {
        Value::Number(n) if n.is_f64() => {
            // accept 12.0 but not 12.5
            let f = n.as_f64().unwrap_or(f64::NAN);
            if f.fract() != 0.0 || !f.is_finite() {
                return Err(StrategyError::InvalidNumber { field, value: text });
            }
            f as i64
        }
        _ => text
            .parse::<i64>()
            .map_err(|_| StrategyError::InvalidNumber { field, value: text.clone() })?,
    };

    if count < 0 {
        return Err(StrategyError::InvalidInput {
            field,
            message: format!("must not be negative, got {}", count),
        });
    }

    u32::try_from(count).map_err(|_| StrategyError::InvalidInput {
        field,
        message: format!("too large: {}", count),
    })
}

fn parse_date(field: &'static str, value: &Value) -> Result<NaiveDate> {
    let raw = match value {
        Value::String(s) => s.as_str(),
        other => {
            return Err(StrategyError::InvalidDate {
                field,
                value: other.to_string(),
            })
        }
    };
    parse_iso_date(raw).ok_or_else(|| StrategyError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn request(value: Value) -> StrategyRequest {
        serde_json::from_value(value).unwrap()
    }

    fn base_request() -> Value {
        json!({
            "totalAmount": 12000,
            "installments": 12,
            "onTimeFee": 50,
            "returnRate": 6,
            "firstPaymentDate": "2024-01-01",
            "lumpSumDate": "2024-01-01"
        })
    }

    #[test]
    fn test_parse_complete_request() {
        let input = request(base_request()).parse().unwrap();

        assert_eq!(input.total_amount, Money::from_major(12_000));
        assert_eq!(input.installments, 12);
        assert_eq!(input.on_time_fee, Money::from_major(50));
        assert_eq!(input.return_rate.as_decimal(), dec!(0.06));
        assert_eq!(input.first_payment_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(input.postpone_months, 0);
        assert_eq!(input.installment_amount(), Money::from_major(1_000));
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let mut body = base_request();
        body["totalAmount"] = json!("12000.50");
        body["installments"] = json!("12");
        body["returnRate"] = json!(" 5.5 ");
        body["postponeMonths"] = json!("2");

        let input = request(body).parse().unwrap();
        assert_eq!(input.total_amount.as_decimal(), dec!(12000.50));
        assert_eq!(input.installments, 12);
        assert_eq!(input.return_rate.as_decimal(), dec!(0.055));
        assert_eq!(input.postpone_months, 2);
    }

    #[test]
    fn test_missing_fields_are_reported_in_order() {
        let mut body = base_request();
        body.as_object_mut().unwrap().remove("returnRate");
        body["lumpSumDate"] = json!("");

        match request(body).parse() {
            Err(StrategyError::MissingField { field }) => assert_eq!(field, "returnRate"),
            other => panic!("expected missing field, got {:?}", other),
        }
    }

    #[test]
    fn test_null_field_is_missing() {
        let mut body = base_request();
        body["onTimeFee"] = Value::Null;

        assert!(matches!(
            request(body).check_required(),
            Err(StrategyError::MissingField { field: "onTimeFee" })
        ));
    }

    #[test]
    fn test_zero_fee_is_present() {
        let mut body = base_request();
        body["onTimeFee"] = json!(0);

        let input = request(body).parse().unwrap();
        assert_eq!(input.on_time_fee, Money::ZERO);
    }

    #[test]
    fn test_malformed_values() {
        let mut body = base_request();
        body["totalAmount"] = json!("12k");
        assert!(matches!(
            request(body).parse(),
            Err(StrategyError::InvalidNumber { field: "totalAmount", .. })
        ));

        let mut body = base_request();
        body["installments"] = json!(12.5);
        assert!(matches!(
            request(body).parse(),
            Err(StrategyError::InvalidNumber { field: "installments", .. })
        ));

        let mut body = base_request();
        body["firstPaymentDate"] = json!("2024-02-30");
        assert!(matches!(
            request(body).parse(),
            Err(StrategyError::InvalidDate { field: "firstPaymentDate", .. })
        ));

        let mut body = base_request();
        body["lumpSumDate"] = json!(20240101);
        assert!(matches!(
            request(body).parse(),
            Err(StrategyError::InvalidDate { field: "lumpSumDate", .. })
        ));
    }

    #[test]
    fn test_whole_float_count_is_accepted() {
        let mut body = base_request();
        body["installments"] = json!(12.0);
        assert_eq!(request(body).parse().unwrap().installments, 12);
    }

    #[test]
    fn test_zero_installments_rejected() {
        let mut body = base_request();
        body["installments"] = json!(0);

        match request(body).parse() {
            Err(err @ StrategyError::InvalidInput { field: "installments", .. }) => {
                assert!(err.is_client_error());
            }
            other => panic!("expected invalid installments, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_values_rejected() {
        let mut body = base_request();
        body["postponeMonths"] = json!(-1);
        assert!(matches!(
            request(body).parse(),
            Err(StrategyError::InvalidInput { field: "postponeMonths", .. })
        ));

        let mut body = base_request();
        body["onTimeFee"] = json!(-5);
        assert!(matches!(
            request(body).parse(),
            Err(StrategyError::InvalidInput { field: "onTimeFee", .. })
        ));

        let mut body = base_request();
        body["totalAmount"] = json!(0);
        assert!(matches!(
            request(body).parse(),
            Err(StrategyError::InvalidInput { field: "totalAmount", .. })
        ));
    }

    #[test]
    fn test_from_json_rejects_malformed_body() {
        assert!(matches!(
            StrategyRequest::from_json(r#"{"totalAmount": }"#),
            Err(StrategyError::MalformedRequest(_))
        ));
    }
}
