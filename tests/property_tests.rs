//! Property-based tests for payload validation boundaries.

use ecommerce_api::dto::{
    customer::CustomerPayload, order::OrderPayload, product::ProductPayload, MAX_TEXT_LEN,
};
use ecommerce_api::errors::ServiceError;
use proptest::prelude::*;

fn text_within_limit() -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<char>(), 0..=MAX_TEXT_LEN)
        .prop_map(|chars| chars.into_iter().collect())
}

fn text_over_limit() -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<char>(), (MAX_TEXT_LEN + 1)..400)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn customer_fields_within_limit_are_kept_verbatim(
        name in text_within_limit(),
        email in proptest::option::of(text_within_limit()),
        address in proptest::option::of(text_within_limit()),
    ) {
        let fields = CustomerPayload {
            name: Some(name.clone()),
            email: email.clone(),
            address: address.clone(),
            ..Default::default()
        }
        .into_fields()
        .unwrap();
        prop_assert_eq!(fields.name, name);
        prop_assert_eq!(fields.email, email);
        prop_assert_eq!(fields.address, address);
    }

    #[test]
    fn overlong_customer_name_is_always_rejected(name in text_over_limit()) {
        let result = CustomerPayload { name: Some(name), ..Default::default() }.into_fields();
        prop_assert!(matches!(result, Err(ServiceError::ValidationError(ref f)) if f.contains_key("name")));
    }

    #[test]
    fn any_finite_price_is_accepted(price in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        let fields = ProductPayload { product_name: Some("Widget".into()), price: Some(price), ..Default::default() }
            .into_fields()
            .unwrap();
        prop_assert_eq!(fields.price, price);
    }

    #[test]
    fn calendar_dates_parse(year in 1i32..9999, month in 1u32..=12, day in 1u32..=28, customer_id in any::<i32>()) {
        let raw = format!("{year:04}-{month:02}-{day:02}");
        let fields = OrderPayload { order_date: Some(raw.clone()), customer_id: Some(customer_id), ..Default::default() }
            .into_fields()
            .unwrap();
        prop_assert_eq!(fields.order_date.format("%Y-%m-%d").to_string(), raw);
        prop_assert_eq!(fields.customer_id, customer_id);
    }
}
