use rand::seq::SliceRandom;
use rand::Rng;

use crate::context::InteractionContext;
use crate::errors::CommandError;
use crate::types::InteractionResponse;

/// Longest message content the platform accepts.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Pads `s` on the left to `length` characters, repeating `pad` (a space when
/// empty) and cutting the last repetition short when needed.
pub fn left_pad(s: &str, length: usize, pad: &str) -> String {
    let pad = if pad.is_empty() { " " } else { pad };
    let missing = length.saturating_sub(s.chars().count());
    if missing == 0 {
        return s.to_string();
    }

    let mut out: String = pad.chars().cycle().take(missing).collect();
    out.push_str(s);
    out
}

pub fn shuffle<R: Rng + ?Sized>(s: &str, rng: &mut R) -> String {
    let mut words: Vec<&str> = s.split(' ').collect();
    words.shuffle(rng);
    words.join(" ")
}

pub fn left_pad_command(ctx: &InteractionContext) -> Result<InteractionResponse, CommandError> {
    let s = ctx.required_string("string")?;
    let length = ctx.required_number("length")?;
    let pad = ctx.string_option("char")?.unwrap_or_default();

    let length = (length.max(0.0) as usize).min(MAX_MESSAGE_CHARS);
    Ok(InteractionResponse::message(left_pad(s, length, pad)))
}

pub fn shuffle_command(ctx: &InteractionContext) -> Result<InteractionResponse, CommandError> {
    match ctx.string_option("string")? {
        Some(s) => Ok(InteractionResponse::message(shuffle(s, &mut rand::thread_rng()))),
        None => Ok(InteractionResponse::message(
            "Please provide a string to shuffle.",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommandOption, Interaction, OptionValue};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn left_pad_cases() {
        let cases = [
            ("no char", "test", 10, "", "      test"),
            ("same length", "test", 4, "", "test"),
            ("shorter target", "test", 2, "", "test"),
            ("custom char", "test", 10, "x", "xxxxxxtest"),
            ("length less than char", "t", 2, "xxxx", "xt"),
            ("long char", "t", 7, "ccccc", "cccccct"),
            ("alternating", "t", 6, "ab", "ababat"),
        ];

        for (name, s, length, pad, want) in cases {
            assert_eq!(left_pad(s, length, pad), want, "{name}");
        }
    }

    #[test]
    fn shuffle_keeps_every_word() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = "the quick brown fox jumps over the lazy dog";
        let out = shuffle(input, &mut rng);

        let mut a: Vec<_> = input.split(' ').collect();
        let mut b: Vec<_> = out.split(' ').collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_of_single_word_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(shuffle("solo", &mut rng), "solo");
        assert_eq!(shuffle("", &mut rng), "");
    }

    fn opt(name: &str, value: OptionValue) -> CommandOption {
        CommandOption {
            name: name.into(),
            value,
        }
    }

    #[test]
    fn left_pad_command_reads_named_options() {
        let ctx = InteractionContext::new(Interaction::command(
            "leftpad",
            vec![
                opt("string", OptionValue::String("7".into())),
                opt("length", OptionValue::Number(3.0)),
                opt("char", OptionValue::String("0".into())),
            ],
        ));
        let resp = left_pad_command(&ctx).unwrap();
        assert_eq!(resp.content(), Some("007"));
    }

    #[test]
    fn left_pad_command_rejects_wrong_types() {
        let ctx = InteractionContext::new(Interaction::command(
            "leftpad",
            vec![
                opt("string", OptionValue::String("7".into())),
                opt("length", OptionValue::String("three".into())),
            ],
        ));
        let err = left_pad_command(&ctx).unwrap_err();
        assert!(matches!(err, CommandError::ValueType { .. }));
    }

    #[test]
    fn left_pad_command_caps_length() {
        let ctx = InteractionContext::new(Interaction::command(
            "leftpad",
            vec![
                opt("string", OptionValue::String("x".into())),
                opt("length", OptionValue::Number(1e9)),
            ],
        ));
        let resp = left_pad_command(&ctx).unwrap();
        assert_eq!(resp.content().unwrap().chars().count(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn shuffle_command_asks_for_input() {
        let ctx = InteractionContext::new(Interaction::command("shuffle", vec![]));
        let resp = shuffle_command(&ctx).unwrap();
        assert_eq!(resp.content(), Some("Please provide a string to shuffle."));
    }
}
