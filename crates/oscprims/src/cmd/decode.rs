use std::io::Read;

use oscprims_codec::{CodecError, Dispatcher, Message, TimeTag};
use oscprims_slip::{SlipError, SlipReader};
use tracing::{info, warn};

use crate::cmd::DecodeArgs;
use crate::exit::{decode_error, io_error, slip_error, CliError, CliResult, SUCCESS};
use crate::output::{print_messages, DecodedMessage, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let input = read_input(&args)?;
    let mut messages = Vec::new();

    let packets = if args.slip {
        let mut reader = SlipReader::new(input.as_slice());
        let mut count = 0usize;
        loop {
            let packet = match reader.read_packet() {
                Ok(packet) => packet,
                Err(SlipError::ConnectionClosed) => break,
                Err(err) => return Err(slip_error(&format!("frame {count}"), err)),
            };
            collect(packet.as_bytes(), count, args.max_depth, &mut messages)
                .map_err(|e| decode_error(&format!("packet {count}"), e))?;
            count += 1;
        }
        count
    } else {
        collect(&input, 0, args.max_depth, &mut messages)
            .map_err(|e| decode_error("packet", e))?;
        1
    };

    if messages.is_empty() {
        warn!(packets, "no messages decoded");
    }
    info!(packets, messages = messages.len(), "decode complete");

    print_messages(&messages, format);
    Ok(SUCCESS)
}

fn read_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(hex) = &args.hex {
        let compact: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
        return hex::decode(compact).map_err(|err| CliError::usage(format!("--hex: {err}")));
    }
    if let Some(path) = &args.input {
        return std::fs::read(path).map_err(|e| io_error("read input", e));
    }
    let mut data = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut data)
        .map_err(|e| io_error("read stdin", e))?;
    Ok(data)
}

/// Dispatch one packet, rendering each delivered message.
fn collect(
    bytes: &[u8],
    packet: usize,
    max_depth: usize,
    out: &mut Vec<DecodedMessage>,
) -> Result<(), CodecError> {
    let mut render_error = None;
    let mut handler = |time_tag: Option<TimeTag>, message: &mut Message| {
        if render_error.is_some() {
            return;
        }
        match DecodedMessage::from_message(packet, time_tag, message) {
            Ok(decoded) => out.push(decoded),
            Err(err) => render_error = Some(err),
        }
    };

    Dispatcher::with_handler(&mut handler)
        .with_max_depth(max_depth)
        .dispatch(bytes)?;

    match render_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
