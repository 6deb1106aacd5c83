#![allow(dead_code)]

use inject::Injectable;
use std::sync::Arc;

#[derive(Injectable)]
struct Target(#[inject("logger")] Option<Arc<String>>);

fn main() {}
