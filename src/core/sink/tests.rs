use std::sync::Arc;

use spin::Mutex;

use crate::core::{Completion, KeepRight, Sink, Source, StreamDone, StreamError, StreamMaterializer};

#[test]
fn first_resolves_with_the_first_element() {
  let graph = Source::from_iter(5..100_i32).to_mat(Sink::first(), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  assert_eq!(materialized.value().poll(), Completion::Ready(Ok(5)));
}

#[test]
fn first_on_an_empty_stream_resolves_with_no_such_element() {
  let graph = Source::from_iter(Vec::<i32>::new()).to_mat(Sink::first(), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  assert_eq!(materialized.value().poll(), Completion::Ready(Err(StreamError::NoSuchElement)));
}

#[test]
fn fold_accumulates_every_element() {
  let graph = Source::from_iter(1..=4_u64).to_mat(Sink::fold(0_u64, |acc, value| acc + value), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  assert_eq!(materialized.value().poll(), Completion::Ready(Ok(10)));
}

#[test]
fn foreach_observes_every_element_in_order() {
  let seen = Arc::new(Mutex::new(Vec::new()));
  let recorder = seen.clone();
  let graph = Source::from_iter(1..=3_i32).to_mat(Sink::foreach(move |value| recorder.lock().push(value)), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  assert_eq!(materialized.value().poll(), Completion::Ready(Ok(StreamDone::new())));
  assert_eq!(*seen.lock(), vec![1, 2, 3]);
}

#[test]
fn ignore_consumes_the_stream() {
  let graph = Source::from_iter(0..1000_u32).to_mat(Sink::ignore(), KeepRight);
  let materialized = graph.run(&mut StreamMaterializer::new()).expect("run");
  assert_eq!(materialized.value().poll(), Completion::Ready(Ok(StreamDone::new())));
}
