use crate::error::{DicelistError, DlResult};

/// Number of faces on a die.
pub const FACES: usize = 6;

/// Number of words a list for `num_dice` dice must hold (6^D).
pub fn word_count(num_dice: u32) -> DlResult<usize> {
    if num_dice == 0 {
        return Err(DicelistError::Config(
            "num_dice must be at least 1".to_string(),
        ));
    }
    FACES.checked_pow(num_dice).ok_or_else(|| {
        DicelistError::Config(format!("{} dice overflow the word count", num_dice))
    })
}

/// Renders `value` as a roll of `num_dice` dice: base 6, most significant
/// die first, digit d shown as face d + 1.
pub fn encode(value: usize, num_dice: u32) -> DlResult<String> {
    let limit = word_count(num_dice)?;
    if value >= limit {
        return Err(DicelistError::DiceRange { value, num_dice });
    }

    let mut faces = vec![b'1'; num_dice as usize];
    let mut rest = value;
    for slot in faces.iter_mut().rev() {
        *slot = b'1' + (rest % FACES) as u8;
        rest /= FACES;
    }

    // Only ASCII digits were written.
    Ok(faces.into_iter().map(char::from).collect())
}

/// Inverse of [`encode`]. Every character must be a face in `1..=6`.
pub fn decode(roll: &str) -> DlResult<usize> {
    if roll.is_empty() {
        return Err(DicelistError::Validation("empty dice sequence".to_string()));
    }

    let mut value: usize = 0;
    for c in roll.chars() {
        let digit = match c {
            '1'..='6' => c as usize - '1' as usize,
            _ => {
                return Err(DicelistError::Validation(format!(
                    "'{}' is not a die face in '{}'",
                    c, roll
                )))
            }
        };
        value = value
            .checked_mul(FACES)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| {
                DicelistError::Validation(format!("dice sequence '{}' is too long", roll))
            })?;
    }
    Ok(value)
}
