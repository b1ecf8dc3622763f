use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
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
  EsNext,
}

impl From<ESTarget> for livepack::ESTarget {
  fn from(value: ESTarget) -> Self {
    match value {
      ESTarget::Es5 => Self::Es5,
      ESTarget::Es2015 => Self::Es2015,
      ESTarget::Es2016 => Self::Es2016,
      ESTarget::Es2017 => Self::Es2017,
      ESTarget::Es2018 => Self::Es2018,
      ESTarget::Es2019 => Self::Es2019,
      ESTarget::Es2020 => Self::Es2020,
      ESTarget::Es2021 => Self::Es2021,
      ESTarget::Es2022 => Self::Es2022,
      ESTarget::Es2023 => Self::Es2023,
      ESTarget::Es2024 => Self::Es2024,
      ESTarget::EsNext => Self::EsNext,
    }
  }
}
