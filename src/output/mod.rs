// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

mod layout;
mod redact;
mod yaml;

pub use layout::prepare_destination;
pub use redact::Redactor;
pub use yaml::YamlWriter;
