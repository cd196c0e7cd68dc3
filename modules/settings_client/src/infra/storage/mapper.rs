//! Entity to model mappers
//!
//! Conversions between schema file entities and contract models. Loading a
//! file goes through the same validators and codec the client uses.

use super::entity::{KeyEntity, RangeEntity, SchemaFileEntity};
use super::memory::admit;
use crate::contract::{KeyDeclaration, SchemaDefinition, ValueRange, ValueType};
use crate::domain::codec;
use crate::domain::validation::{validate_key_name, validate_schema_id};
use anyhow::{bail, Context};
use std::collections::HashSet;

// ===== Schema Conversions =====

impl TryFrom<SchemaFileEntity> for SchemaDefinition {
    type Error = anyhow::Error;

    fn try_from(entity: SchemaFileEntity) -> Result<Self, Self::Error> {
        let id = validate_schema_id(&entity.schema_id)?;

        let mut seen = HashSet::new();
        let mut keys = Vec::with_capacity(entity.keys.len());
        for key in entity.keys {
            if !seen.insert(key.name.clone()) {
                bail!("schema '{}' declares key '{}' twice", id, key.name);
            }
            let name = key.name.clone();
            let declaration = KeyDeclaration::try_from(key)
                .with_context(|| format!("invalid key '{}' in schema '{}'", name, id))?;
            keys.push(declaration);
        }

        Ok(Self { id, keys })
    }
}

impl From<&SchemaDefinition> for SchemaFileEntity {
    fn from(model: &SchemaDefinition) -> Self {
        Self {
            schema_id: model.id.to_string(),
            keys: model.keys.iter().map(KeyEntity::from).collect(),
        }
    }
}

// ===== Key Conversions =====

impl TryFrom<KeyEntity> for KeyDeclaration {
    type Error = anyhow::Error;

    fn try_from(entity: KeyEntity) -> Result<Self, Self::Error> {
        let name = validate_key_name(&entity.name)?;
        let value_type: ValueType = entity.r#type.parse()?;
        let default = codec::encode(value_type, &entity.default).context("invalid default value")?;

        if entity.range.is_some() && !value_type.is_numeric() {
            bail!("range is only allowed on numeric keys, not '{}'", value_type);
        }
        if entity.choices.is_some() && value_type != ValueType::Str {
            bail!("choices are only allowed on string keys, not '{}'", value_type);
        }
        if let Some(range) = entity.range {
            if range.min > range.max {
                bail!("range min {} is greater than max {}", range.min, range.max);
            }
        }

        let declaration = Self {
            name,
            value_type,
            default,
            range: entity.range.map(|r| ValueRange {
                min: r.min,
                max: r.max,
            }),
            choices: entity.choices,
            summary: entity.summary,
        };
        admit(&declaration, &declaration.default).context("default violates the key's constraints")?;
        Ok(declaration)
    }
}

impl From<&KeyDeclaration> for KeyEntity {
    fn from(model: &KeyDeclaration) -> Self {
        Self {
            name: model.name.to_string(),
            r#type: model.value_type.signature().to_string(),
            default: codec::decode(&model.default),
            range: model.range.map(|r| RangeEntity {
                min: r.min,
                max: r.max,
            }),
            choices: model.choices.clone(),
            summary: model.summary.clone(),
        }
    }
}
