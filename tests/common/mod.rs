// Each integration-test binary compiles this module separately and uses
// a different subset of the builders.
#![allow(dead_code)]

pub mod synthetic_image;
