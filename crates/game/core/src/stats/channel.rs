/// Named numeric axis that timed modifiers can scale.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatChannel {
    Damage,
    AttackSpeed,
    MoveSpeed,
    DashCooldown,
    Health,
    ExperienceRadius,
    CollectionSpeed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip_through_snake_case() {
        for channel in StatChannel::iter() {
            assert_eq!(StatChannel::from_str(channel.as_ref()), Ok(channel));
        }
        assert_eq!(
            StatChannel::from_str("Attack_Speed"),
            Ok(StatChannel::AttackSpeed)
        );
    }
}
