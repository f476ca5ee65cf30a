use std::convert::TryFrom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    Korean,
    English,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Korean => "ko-KR",
            Lang::English => "en-US",
        }
    }

    /// Language part of the code, as used in request URLs and translation file names.
    pub fn short(&self) -> &'static str {
        match self {
            Lang::Korean => "ko",
            Lang::English => "en",
        }
    }

    pub const fn all() -> &'static [Lang] {
        &[Lang::Korean, Lang::English]
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Lang {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "ko-kr" | "ko" => Ok(Lang::Korean),
            "en-us" | "en" => Ok(Lang::English),
            _ => Err(anyhow::anyhow!(
                "Unknown language '{value}'. Supported languages: ko-KR, en-US."
            )),
        }
    }
}
