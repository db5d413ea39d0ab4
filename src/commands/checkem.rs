use crate::context::InteractionContext;
use crate::errors::CommandError;
use crate::types::InteractionResponse;

const CLAP: &str = "<a:Clap:1103063782760124540>";
const EZ: &str = "<:EZ:1103063620209885214>";
const PAGGI: &str = "<:Paggi:1103063622474792980>";

fn repeat_name(count: usize) -> Option<&'static str> {
    let name = match count {
        2 => "dubs",
        3 => "trips",
        4 => "quads",
        5 => "quints",
        6 => "sexts",
        7 => "septs",
        8 => "octs",
        9 => "nines",
        10 => "decs",
        _ => return None,
    };
    Some(name)
}

/// Celebrates ids ending in a run of repeated characters.
pub fn checkem(id: &str) -> String {
    let Some(last) = id.chars().last() else {
        return String::new();
    };
    let repeated = id.chars().rev().take_while(|c| *c == last).count();

    if repeated > 10 {
        return format!("{id} - {PAGGI} {CLAP} you got more than 10 repeating digits?!");
    }
    match repeat_name(repeated) {
        Some(name) => format!("{id} - {EZ} {CLAP} gratz on the {name}"),
        None => id.to_string(),
    }
}

pub fn checkem_command(ctx: &InteractionContext) -> Result<InteractionResponse, CommandError> {
    Ok(InteractionResponse::message(checkem(&ctx.interaction().id)))
}
