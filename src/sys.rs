//! Raw declarations for the CatBoost model interface, generated by `bindgen`
//! from `c_api.h` in the build script.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(dead_code)]

include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
