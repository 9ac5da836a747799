// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Sales orders from intake through payment clearance, factory acceptance, split and cancel.

pub mod store;

use rust_decimal::Decimal;

pub use store::{
    FactoryOrder, FactoryOrderList, OrderFilter, OrderStore, OrderStoreError, SalesOrder,
    SalesOrderList,
};

/// Whether a total price is more than the quantity at the unit price plus the discount amount.
///
/// Only checked when quantity, price and total are all known.
pub fn total_price_too_high(
    quantity: Option<Decimal>,
    price: Option<Decimal>,
    total_price: Option<Decimal>,
    discount_amount: Option<Decimal>,
) -> bool {
    match (quantity, price, total_price) {
        (Some(quantity), Some(price), Some(total_price)) => {
            total_price > quantity * price + discount_amount.unwrap_or(Decimal::ZERO)
        }
        _ => false,
    }
}

/// The share of `amount` that belongs to `part` of `whole`, rounded to two places
pub(crate) fn prorate(amount: Decimal, part: Decimal, whole: Decimal) -> Decimal {
    (amount * part)
        .checked_div(whole)
        .unwrap_or(Decimal::ZERO)
        .round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, NaiveDate};

    fn d(value: &str) -> Option<Decimal> {
        Some(value.parse().expect("Invalid decimal"))
    }

    #[test]
    fn test_total_price_too_high() {
        assert!(!total_price_too_high(d("10"), d("25"), d("250"), None));
        assert!(total_price_too_high(d("10"), d("25"), d("250.01"), None));
        assert!(!total_price_too_high(d("10"), d("25"), d("260"), d("10")));
        assert!(total_price_too_high(d("10"), d("25"), d("261"), d("10")));
        assert!(!total_price_too_high(None, d("25"), d("1000"), None));
        assert!(!total_price_too_high(d("10"), d("25"), None, None));
    }

    #[test]
    fn test_prorate() {
        assert_eq!(
            prorate(Decimal::from(1000), Decimal::from(3), Decimal::from(10)),
            Decimal::from(300)
        );
        assert_eq!(
            prorate(Decimal::from(100), Decimal::from(1), Decimal::from(3)),
            "33.33".parse::<Decimal>().expect("decimal")
        );
        assert_eq!(prorate(Decimal::from(5), Decimal::ONE, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_order_time_span_omits_zero_days() {
        let created = NaiveDate::from_ymd(2024, 1, 5).and_hms(10, 0, 0);
        let order = SalesOrder {
            id: 1,
            company: "Acme".to_string(),
            address: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            sales_person: "Ravi".to_string(),
            location: "Hadapsar".to_string(),
            mobile1: "9876543210".to_string(),
            mobile2: "9876543211".to_string(),
            product_name: None,
            quantity: None,
            price: None,
            discount: None,
            discount_amount: None,
            total_price: None,
            remark: None,
            order_created: created,
            bill_no: None,
            payment_cleared: false,
            on_hold: false,
            factory_accepted: false,
            available_qty: Decimal::ZERO,
            dispatch_date: None,
            time_span_text: None,
            is_split: false,
            is_cancelled: false,
        };

        assert_eq!(
            order.time_span(created + Duration::hours(5) + Duration::minutes(12)),
            "5 Hours 12 Minutes"
        );
        assert_eq!(
            order.time_span(created + Duration::days(2) + Duration::hours(5)),
            "2 Days 5 Hours 0 Minutes"
        );
    }
}
