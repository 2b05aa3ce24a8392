/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Built-in Unreal Engine plugin templates.
//!
//! Each message gets a `USTRUCT` header under `public/<dialect>/` and a source
//! file under `private/<dialect>/` that forwards to the MAVLink C pack and
//! decode functions.

use crate::artifact::{ArtifactSpec, Scope};
use mavforge_core::error::TemplateError;

/// Default module path below the output directory.
pub const MODULE_PATH: &str = "MavLinkMsgs/Source/MavLinkMsgs";

/// Per-message header.
pub const MESSAGE_HEADER: &str = r#"
#pragma once

#include "CoreMinimal.h"
#include "MavLinkMsg_${name_lower}.generated.h"

struct __mavlink_message;

USTRUCT(BlueprintType)
struct MAVLINKMSGS_API FMavlinkMsg_${name_lower}
{
    GENERATED_BODY()

${{fields:    /*${description} ${units}*/
    UPROPERTY()
    ${type} ${name}${array_suffix};

}}
    void Serialize(uint8 systemId, uint8 componentId, __mavlink_message& msg, uint16& packSize);
    void Serialize(uint8 systemId, uint8 componentId, TSharedRef<TArray<uint8>, ESPMode::ThreadSafe>& buffer);
    void Deserialize(const __mavlink_message& msg);
};
"#;

/// Per-message source file.
pub const MESSAGE_SOURCE: &str = r#"
#include "MavLinkMsg_${name_lower}.h"
#include "${dialect_name}/mavlink.h"

void FMavlinkMsg_${name_lower}::Serialize(uint8 systemId, uint8 componentId, __mavlink_message& msg, uint16& packSize)
{
    packSize = mavlink_msg_${name_lower}_pack(systemId, componentId, &msg${{arg_fields:, ${array_cast}${name}}});
}

void FMavlinkMsg_${name_lower}::Serialize(uint8 systemId, uint8 componentId, TSharedRef<TArray<uint8>, ESPMode::ThreadSafe>& buffer)
{
    uint16 size;
    __mavlink_message msg;
    Serialize(systemId, componentId, msg, size);
    buffer->SetNum(size);
    mavlink_msg_to_send_buffer(buffer->GetData(), &msg);
}

void FMavlinkMsg_${name_lower}::Deserialize(const mavlink_message_t& msg)
{
    mavlink_${name_lower}_t decoded;
    mavlink_msg_${name_lower}_decode(&msg, &decoded);
${{fields:    FMemory::Memcpy(&${name}, &decoded.${name}, sizeof(${name}));
}}}
"#;

/// Per-dialect dispatch header.
pub const DISPATCH_HEADER: &str = r#"
#pragma once

#include "CoreMinimal.h"
#include "${basename}_dispatch.generated.h"

USTRUCT(BlueprintType)
struct F${basename}Dispatch
{
    GENERATED_BODY()
};
"#;

/// Returns the per-message header artifact.
///
/// # Errors
/// Returns a [`TemplateError`] if the built-in template fails to parse.
pub fn header() -> Result<ArtifactSpec, TemplateError> {
    ArtifactSpec::new(
        "header",
        Scope::Message,
        "public",
        "MavLinkMsg_${name_lower}.h",
        MESSAGE_HEADER,
    )
}

/// Returns the per-message source artifact.
///
/// # Errors
/// Returns a [`TemplateError`] if the built-in template fails to parse.
pub fn source() -> Result<ArtifactSpec, TemplateError> {
    ArtifactSpec::new(
        "source",
        Scope::Message,
        "private",
        "MavLinkMsg_${name_lower}.cpp",
        MESSAGE_SOURCE,
    )
}

/// Returns the per-dialect dispatch header artifact.
///
/// # Errors
/// Returns a [`TemplateError`] if the built-in template fails to parse.
pub fn dispatch() -> Result<ArtifactSpec, TemplateError> {
    ArtifactSpec::new(
        "dispatch",
        Scope::Dialect,
        "public",
        "${basename}_dispatch.h",
        DISPATCH_HEADER,
    )
}

/// Returns the standard artifact set.
///
/// # Errors
/// Returns a [`TemplateError`] if a built-in template fails to parse.
pub fn artifacts(include_dispatch: bool) -> Result<Vec<ArtifactSpec>, TemplateError> {
    let mut specs = vec![header()?, source()?];
    if include_dispatch {
        specs.push(dispatch()?);
    }
    Ok(specs)
}
