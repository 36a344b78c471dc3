use oscprims_codec::{Argument, Bundle, Message, MidiMessage, Packet, RgbaColour, TimeTag};
use oscprims_slip::{encode_packet, encoded_len};
use tracing::info;

use crate::cmd::EncodeArgs;
use crate::exit::{build_error, io_error, CliResult, SUCCESS};
use crate::output::{print_encoded, EncodedOutput, OutputFormat};

/// One `--arg` value, owning whatever the argument borrows.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Fixed(Argument<'static>),
    String(String),
    AlternateString(String),
    Blob(Vec<u8>),
}

impl ArgValue {
    pub fn as_argument(&self) -> Argument<'_> {
        match self {
            ArgValue::Fixed(argument) => *argument,
            ArgValue::String(s) => Argument::String(s),
            ArgValue::AlternateString(s) => Argument::AlternateString(s),
            ArgValue::Blob(data) => Argument::Blob(data),
        }
    }
}

pub fn parse_arg_value(raw: &str) -> Result<ArgValue, String> {
    let (tag, value) = match raw.split_once(':') {
        Some((tag, value)) => (tag, Some(value)),
        None => (raw, None),
    };
    let need = || value.ok_or_else(|| format!("'{tag}' needs a value"));
    let fixed = |argument: Argument<'static>| -> Result<ArgValue, String> {
        Ok(ArgValue::Fixed(argument))
    };

    match tag {
        "i" => fixed(Argument::Int32(parse_num(need()?)?)),
        "f" => fixed(Argument::Float32(parse_num(need()?)?)),
        "s" => Ok(ArgValue::String(need()?.to_string())),
        "S" => Ok(ArgValue::AlternateString(need()?.to_string())),
        "b" => hex::decode(need()?)
            .map(ArgValue::Blob)
            .map_err(|err| format!("invalid blob hex: {err}")),
        "h" => fixed(Argument::Int64(parse_num(need()?)?)),
        "t" => fixed(Argument::TimeTag(parse_time_tag(need()?)?)),
        "d" => fixed(Argument::Double(parse_num(need()?)?)),
        "c" => {
            let value = need()?;
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => fixed(Argument::Character(c)),
                _ => Err(format!("'{value}' is not a single ASCII character")),
            }
        }
        "r" => {
            let bytes =
                hex::decode(need()?).map_err(|err| format!("invalid colour: {err}"))?;
            let [red, green, blue, alpha]: [u8; 4] = bytes
                .try_into()
                .map_err(|_| "colour must be 4 bytes (rrggbbaa)".to_string())?;
            fixed(Argument::RgbaColour(RgbaColour::new(red, green, blue, alpha)))
        }
        "m" => {
            let parts = need()?
                .split(',')
                .map(parse_num::<u8>)
                .collect::<Result<Vec<_>, _>>()?;
            let [port_id, status, data1, data2]: [u8; 4] = parts
                .try_into()
                .map_err(|_| "MIDI needs port,status,data1,data2".to_string())?;
            fixed(Argument::MidiMessage(MidiMessage::new(port_id, status, data1, data2)))
        }
        "T" => fixed(Argument::True),
        "F" => fixed(Argument::False),
        "N" => fixed(Argument::Nil),
        "I" => fixed(Argument::Infinitum),
        "[" => fixed(Argument::ArrayBegin),
        "]" => fixed(Argument::ArrayEnd),
        other => Err(format!("unknown type tag '{other}'")),
    }
}

pub fn parse_time_tag(raw: &str) -> Result<TimeTag, String> {
    match raw {
        "now" => Ok(TimeTag::now()),
        "immediate" => Ok(TimeTag::IMMEDIATE),
        _ => parse_num::<u64>(raw).map(TimeTag::from_raw),
    }
}

fn parse_num<T: std::str::FromStr>(raw: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err| format!("invalid number '{raw}': {err}"))
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let mut message = Message::new(&args.address).map_err(|e| build_error("address", e))?;
    for (index, value) in args.args.iter().enumerate() {
        message
            .add_argument(value.as_argument())
            .map_err(|e| build_error(&format!("argument {index}"), e))?;
    }

    let (kind, packet) = if args.bundle {
        let mut bundle = Bundle::new(args.time_tag.unwrap_or(TimeTag::IMMEDIATE));
        bundle
            .add_contents(&message)
            .map_err(|e| build_error("bundle", e))?;
        ("bundle", Packet::from_contents(&bundle))
    } else {
        ("message", Packet::from_contents(&message))
    };
    let packet = packet.map_err(|e| build_error("serialize", e))?;

    let bytes = if args.slip {
        let mut framed = vec![0u8; encoded_len(packet.as_bytes())];
        encode_packet(&packet, &mut framed).map_err(|e| build_error("slip", e))?;
        framed
    } else {
        packet.as_bytes().to_vec()
    };

    info!(
        kind,
        size = packet.len(),
        slip = args.slip,
        arguments = message.argument_count(),
        "packet encoded"
    );

    if let Some(path) = &args.output {
        std::fs::write(path, &bytes).map_err(|e| io_error("write output", e))?;
        if matches!(format, OutputFormat::Raw) {
            return Ok(SUCCESS);
        }
    }

    print_encoded(&EncodedOutput::new(kind, args.slip, &bytes), &bytes, format);
    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_values() {
        assert_eq!(
            parse_arg_value("i:-7").unwrap(),
            ArgValue::Fixed(Argument::Int32(-7))
        );
        assert_eq!(
            parse_arg_value("d:2.5").unwrap(),
            ArgValue::Fixed(Argument::Double(2.5))
        );
        assert_eq!(
            parse_arg_value("s:hello:world").unwrap(),
            ArgValue::String("hello:world".to_string())
        );
        assert_eq!(
            parse_arg_value("b:00ff").unwrap(),
            ArgValue::Blob(vec![0x00, 0xFF])
        );
        assert_eq!(parse_arg_value("T").unwrap(), ArgValue::Fixed(Argument::True));
        assert_eq!(
            parse_arg_value("c:x").unwrap(),
            ArgValue::Fixed(Argument::Character('x'))
        );
    }

    #[test]
    fn parses_composite_values() {
        assert_eq!(
            parse_arg_value("r:01020304").unwrap(),
            ArgValue::Fixed(Argument::RgbaColour(RgbaColour::new(1, 2, 3, 4)))
        );
        assert_eq!(
            parse_arg_value("m:0,144,60,100").unwrap(),
            ArgValue::Fixed(Argument::MidiMessage(MidiMessage::new(0, 144, 60, 100)))
        );
        assert_eq!(
            parse_arg_value("t:immediate").unwrap(),
            ArgValue::Fixed(Argument::TimeTag(TimeTag::IMMEDIATE))
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_arg_value("q:1").is_err());
        assert!(parse_arg_value("i").is_err());
        assert!(parse_arg_value("i:one").is_err());
        assert!(parse_arg_value("c:xy").is_err());
        assert!(parse_arg_value("r:0102").is_err());
        assert!(parse_arg_value("m:1,2,3").is_err());
        assert!(parse_arg_value("b:zz").is_err());
    }

    #[test]
    fn time_tag_accepts_keywords_and_raw() {
        assert_eq!(parse_time_tag("immediate").unwrap(), TimeTag::IMMEDIATE);
        assert_eq!(parse_time_tag("42").unwrap(), TimeTag::from_raw(42));
        assert!(!parse_time_tag("now").unwrap().is_immediate());
        assert!(parse_time_tag("later").is_err());
    }

    #[test]
    fn value_borrows_into_argument() {
        let value = ArgValue::String("abc".to_string());
        assert_eq!(value.as_argument(), Argument::String("abc"));
        let mut message = Message::new("/x").unwrap();
        message.add_argument(value.as_argument()).unwrap();
        assert_eq!(message.type_tag_string(), ",s");
    }
}
