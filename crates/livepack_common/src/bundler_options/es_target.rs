use oxc::transformer::ESTarget as OxcESTarget;

/// Syntax level the transform stage lowers scripts to. Markup is always lowered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ESTarget {
  Es5,
  Es2015,
  Es2016,
  Es2017,
  Es2018,
  Es2019,
  Es2020,
  Es2021,
  Es2022,
  Es2023,
  Es2024,
  #[default]
  EsNext,
}

impl From<ESTarget> for OxcESTarget {
  fn from(value: ESTarget) -> Self {
    match value {
      ESTarget::Es5 => Self::ES5,
      ESTarget::Es2015 => Self::ES2015,
      ESTarget::Es2016 => Self::ES2016,
      ESTarget::Es2017 => Self::ES2017,
      ESTarget::Es2018 => Self::ES2018,
      ESTarget::Es2019 => Self::ES2019,
      ESTarget::Es2020 => Self::ES2020,
      ESTarget::Es2021 => Self::ES2021,
      ESTarget::Es2022 => Self::ES2022,
      ESTarget::Es2023 => Self::ES2023,
      ESTarget::Es2024 => Self::ES2024,
      ESTarget::EsNext => Self::ESNext,
    }
  }
}

#[test]
fn defaults_to_newest_syntax() {
  assert_eq!(OxcESTarget::from(ESTarget::default()), OxcESTarget::ESNext);
  assert_eq!(OxcESTarget::from(ESTarget::Es2015), OxcESTarget::ES2015);
}
