#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use optic_reflect as reflect;
pub use optic_utils as utils;
