use super::{ConnectionRuntime, Demand};
use crate::core::StreamError;

fn connection() -> ConnectionRuntime {
  ConnectionRuntime::new((0, 0), (1, 0), 4)
}

#[test]
fn requests_accumulate_demand() {
  let mut conn = connection();
  assert_eq!(conn.request_demand(3), Ok(Demand::Finite(3)));
  assert_eq!(conn.request_demand(2), Ok(Demand::Finite(5)));
}

#[test]
fn zero_request_is_rejected() {
  let mut conn = connection();
  assert_eq!(conn.request_demand(0), Err(StreamError::InvalidDemand));
}

#[test]
fn consumption_stops_at_zero() {
  let mut conn = connection();
  let _ = conn.request_demand(1);
  assert!(conn.consume_demand());
  assert!(!conn.consume_demand());
  assert!(!conn.has_demand());
}

#[test]
fn overflowing_request_saturates_to_unbounded() {
  let mut conn = connection();
  let _ = conn.request_demand(u64::MAX);
  assert_eq!(conn.request_demand(1), Ok(Demand::Unbounded));
  assert!(conn.consume_demand());
  assert!(conn.has_demand());
}
