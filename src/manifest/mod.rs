// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

mod node;
mod resource;
mod service;
mod splitter;

pub use node::{Node, Scalar, ScalarStyle, alias_name};
pub use resource::Resource;
pub use service::resolve_service_name;
pub use splitter::{DocumentSplitter, RawDocument};
