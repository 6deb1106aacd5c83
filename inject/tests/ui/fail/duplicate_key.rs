#![allow(dead_code)]

use inject::Injectable;
use std::sync::Arc;

#[derive(Injectable)]
struct Target {
    #[inject("a")]
    #[inject("b")]
    logger: Option<Arc<String>>,
}

fn main() {}
