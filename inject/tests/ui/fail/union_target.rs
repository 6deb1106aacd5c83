#![allow(dead_code)]

use inject::Injectable;

#[derive(Injectable)]
union Target {
    port: u16,
}

fn main() {}
