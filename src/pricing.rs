// Aggregate trip price and per-category breakdown.

use crate::plan::RawPlan;
use crate::summary::PriceBreakdown;
use tracing::debug;

// Trip total from the first source present.
//
// Order: `total_price`, `price`, `summary.total_price`, then the sum of the
// flight, hotel and transport prices. The computed sum is only reported
// when it is strictly positive.
pub fn total_price(plan: &RawPlan) -> Option<f64> {
    plan.total_price
        .or(plan.price)
        .or_else(|| plan.summary.as_ref().and_then(|s| s.total_price))
        .or_else(|| component_sum(plan))
}

fn component_sum(plan: &RawPlan) -> Option<f64> {
    let flight = plan
        .flight
        .as_ref()
        .and_then(|f| f.total_price.or(f.price_total))
        .unwrap_or(0.0);
    let hotel = plan
        .hotel
        .as_ref()
        .and_then(|h| h.amount())
        .unwrap_or(0.0);
    let transport = plan
        .transport
        .as_ref()
        .and_then(|t| t.fields.price.or(t.fields.price_amount))
        .unwrap_or(0.0);

    let sum = flight + hotel + transport;
    if sum > 0.0 {
        debug!(flight, hotel, transport, "trip total computed from components");
        Some(sum)
    } else {
        None
    }
}

// Category prices read straight from `price_breakdown`, plus the trip total.
//
// The categories are not reconciled against the total.
pub fn price_breakdown(plan: &RawPlan, currency: &str) -> PriceBreakdown {
    let breakdown = plan.price_breakdown.clone().unwrap_or_default();
    PriceBreakdown {
        flight: breakdown.flight,
        hotel: breakdown.hotel,
        transport: breakdown.transport,
        car: breakdown.car,
        total: total_price(plan),
        currency: currency.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn plan(value: serde_json::Value) -> RawPlan {
        serde_json::from_value(value).unwrap()
    }

    #[test_case(json!({ "total_price": 100, "price": 200, "summary": { "total_price": 300 } }), Some(100.0); "explicit total first")]
    #[test_case(json!({ "price": 200, "summary": { "total_price": 300 } }), Some(200.0); "price second")]
    #[test_case(json!({ "summary": { "total_price": 300 }, "flight": { "price_total": 50 } }), Some(300.0); "summary third")]
    #[test_case(json!({ "flight": { "price_total": 500 }, "hotel": { "price_total": 300 } }), Some(800.0); "component sum")]
    #[test_case(json!({ "flight": { "total_price": 400, "price_total": 1 }, "transport": { "price_amount": 60 } }), Some(460.0); "component aliases")]
    #[test_case(json!({ "flight": { "price_total": 0 } }), None; "zero sum is absent")]
    #[test_case(json!({ "total_price": "1.250,00", "price": 1250 }), Some(1250.0); "european formatted total skipped")]
    #[test_case(json!({ "total_price": "1,250.00", "price": 99 }), Some(1250.0); "grouped total accepted")]
    #[test_case(json!({}), None; "empty plan")]
    fn test_total_price(value: serde_json::Value, expected: Option<f64>) {
        assert_eq!(total_price(&plan(value)), expected);
    }

    #[test]
    fn test_breakdown_is_independent_of_total() {
        let plan = plan(json!({
            "total_price": 10000,
            "price_breakdown": { "flight": 6000, "hotel": 3000, "car": 500 }
        }));

        let breakdown = price_breakdown(&plan, "THB");
        assert_eq!(breakdown.flight, Some(6000.0));
        assert_eq!(breakdown.hotel, Some(3000.0));
        assert_eq!(breakdown.transport, None);
        assert_eq!(breakdown.car, Some(500.0));
        assert_eq!(breakdown.total, Some(10000.0));
        assert_eq!(breakdown.currency, "THB");
    }
}
