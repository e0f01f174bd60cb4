use brc_check::{CheckReport, ReferenceData};
use brc_core::{CountRecord, CountSession, RawRecord};
use schemars::schema_for;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// JSON schema of the requested type.
pub fn schema_value(kind: SchemaType) -> anyhow::Result<Value> {
    let schema = match kind {
        SchemaType::RawRecord => schema_for!(RawRecord),
        SchemaType::CountRecord => schema_for!(CountRecord),
        SchemaType::CountSession => schema_for!(CountSession),
        SchemaType::CheckReport => schema_for!(CheckReport),
        SchemaType::ReferenceData => schema_for!(ReferenceData),
    };
    Ok(serde_json::to_value(schema)?)
}

/// Handle `brc schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_value(args.type_name)?, flags.format)
}
