#![allow(dead_code)]

use inject::Injectable;

#[derive(Injectable)]
enum Target {
    Ready,
}

fn main() {}
