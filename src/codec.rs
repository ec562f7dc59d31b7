// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Decoding manifests into typed resources and printing them back out.

use crate::error::{KubekindError, Result};
use crate::types::TypedResource;
use serde_yaml::Value;
use std::io::Write;

/// Decode a YAML or JSON manifest into `K`.
///
/// A manifest declaring a different `kind` or `apiVersion` than `K` is rejected. Manifests that
/// omit them are accepted.
pub fn decode<K: TypedResource>(data: &[u8]) -> Result<K> {
    let value: Value = serde_yaml::from_slice(data)?;
    check_type_meta::<K>(&value)?;
    Ok(serde_yaml::from_value(value)?)
}

pub fn decode_str<K: TypedResource>(input: &str) -> Result<K> {
    decode(input.as_bytes())
}

fn check_type_meta<K: TypedResource>(value: &Value) -> Result<()> {
    let expected_kind = K::kind(&());
    let expected_api_version = K::api_version(&());
    let kind = value.get("kind").and_then(Value::as_str);
    let api_version = value.get("apiVersion").and_then(Value::as_str);

    let kind_matches = kind.is_none_or(|k| k == expected_kind);
    let api_version_matches = api_version.is_none_or(|v| v == expected_api_version);
    if kind_matches && api_version_matches {
        return Ok(());
    }

    Err(KubekindError::KindMismatch {
        expected: format!("{}/{}", expected_api_version, expected_kind),
        found: format!(
            "{}/{}",
            api_version.unwrap_or(&*expected_api_version),
            kind.unwrap_or(&*expected_kind)
        ),
    })
}

/// Print `obj` as a YAML document
pub fn print_yaml<K: TypedResource, W: Write>(obj: &K, writer: W) -> Result<()> {
    serde_yaml::to_writer(writer, obj)?;
    Ok(())
}

/// Print `obj` as indented JSON followed by a newline
pub fn print_json<K: TypedResource, W: Write>(obj: &K, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, obj)?;
    writer.write_all(b"\n")?;
    Ok(())
}
