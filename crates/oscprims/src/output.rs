use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use oscprims_codec::{Argument, CodecError, Message, TimeTag};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Summary of an encoded packet.
#[derive(Serialize)]
pub struct EncodedOutput {
    schema_id: &'static str,
    kind: &'static str,
    framing: &'static str,
    size: usize,
    hex: String,
}

impl EncodedOutput {
    pub fn new(kind: &'static str, slip: bool, bytes: &[u8]) -> Self {
        Self {
            schema_id: "oscprims/cli/v1/packet-encoded",
            kind,
            framing: if slip { "slip" } else { "none" },
            size: bytes.len(),
            hex: hex::encode(bytes),
        }
    }
}

pub fn print_encoded(out: &EncodedOutput, bytes: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", to_json_line(out)),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["KIND", "FRAMING", "SIZE", "HEX"])
                .add_row(vec![
                    out.kind.to_string(),
                    out.framing.to_string(),
                    out.size.to_string(),
                    out.hex.clone(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "kind={} framing={} size={} hex={}",
                out.kind, out.framing, out.size, out.hex
            );
        }
        OutputFormat::Raw => print_raw(bytes),
    }
}

/// One message delivered by the dispatcher.
#[derive(Serialize)]
pub struct DecodedMessage {
    schema_id: &'static str,
    packet: usize,
    time_tag: Option<u64>,
    address: String,
    type_tags: String,
    arguments: Value,
}

impl DecodedMessage {
    pub fn from_message(
        packet: usize,
        time_tag: Option<TimeTag>,
        message: &Message,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            schema_id: "oscprims/cli/v1/message-decoded",
            packet,
            time_tag: time_tag.map(TimeTag::raw),
            address: message.address_pattern().to_string(),
            type_tags: message.type_tag_string().to_string(),
            arguments: arguments_to_json(message)?,
        })
    }
}

pub fn print_messages(messages: &[DecodedMessage], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for message in messages {
                println!("{}", to_json_line(message));
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PACKET", "TIME TAG", "ADDRESS", "TAGS", "ARGUMENTS"]);
            for message in messages {
                table.add_row(vec![
                    message.packet.to_string(),
                    time_tag_label(message.time_tag),
                    message.address.clone(),
                    message.type_tags.clone(),
                    message.arguments.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for message in messages {
                println!(
                    "packet={} time_tag={} address={} tags={} args={}",
                    message.packet,
                    time_tag_label(message.time_tag),
                    message.address,
                    message.type_tags,
                    message.arguments
                );
            }
        }
        OutputFormat::Raw => {}
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn to_json_line<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

fn time_tag_label(raw: Option<u64>) -> String {
    match raw {
        None => "-".to_string(),
        Some(raw) => TimeTag::from_raw(raw).to_string(),
    }
}

/// Render arguments as JSON, nesting `[`...`]` runs as arrays.
pub fn arguments_to_json(message: &Message) -> Result<Value, CodecError> {
    let mut stack: Vec<Vec<Value>> = vec![Vec::new()];
    for argument in message.arguments() {
        match argument? {
            Argument::ArrayBegin => stack.push(Vec::new()),
            Argument::ArrayEnd => {
                if stack.len() < 2 {
                    return Err(CodecError::Malformed("unbalanced array end"));
                }
                let items = stack.pop().unwrap_or_default();
                if let Some(parent) = stack.last_mut() {
                    parent.push(Value::Array(items));
                }
            }
            other => {
                if let Some(current) = stack.last_mut() {
                    current.push(argument_to_json(&other));
                }
            }
        }
    }
    if stack.len() != 1 {
        return Err(CodecError::Malformed("unterminated array"));
    }
    Ok(Value::Array(stack.pop().unwrap_or_default()))
}

fn argument_to_json(argument: &Argument<'_>) -> Value {
    match *argument {
        Argument::Int32(v) => json!(v),
        Argument::Float32(v) => json!(v),
        Argument::String(s) | Argument::AlternateString(s) => json!(s),
        Argument::Blob(data) => json!({ "blob": hex::encode(data) }),
        Argument::Int64(v) => json!(v),
        Argument::TimeTag(tag) => json!({ "time_tag": tag.raw() }),
        Argument::Double(v) => json!(v),
        Argument::Character(c) => json!({ "char": c.to_string() }),
        Argument::RgbaColour(c) => json!({ "rgba": [c.red, c.green, c.blue, c.alpha] }),
        Argument::MidiMessage(m) => {
            json!({ "midi": [m.port_id, m.status, m.data1, m.data2] })
        }
        Argument::True => json!(true),
        Argument::False => json!(false),
        Argument::Nil => Value::Null,
        Argument::Infinitum => json!("infinitum"),
        Argument::ArrayBegin => json!("["),
        Argument::ArrayEnd => json!("]"),
    }
}
