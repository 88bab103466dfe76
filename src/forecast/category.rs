/// Icon classes a forecast can be shown as. Closed set; anything we can't
/// recognize lands on [WeatherCategory::Cloudy].
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeatherCategory {
    Clear,
    PartlyCloudy,
    #[default]
    Cloudy,
    Rain,
    Snow,
    Thunder,
    CloudyNight,
    ClearNight,
}

impl WeatherCategory {
    pub const ALL: &'static [Self] = &[
        Self::Clear,
        Self::PartlyCloudy,
        Self::Cloudy,
        Self::Rain,
        Self::Snow,
        Self::Thunder,
        Self::CloudyNight,
        Self::ClearNight,
    ];

    /// Keyword groups, lowest precedence first. Every group that matches
    /// overwrites the result of the ones before it, so "partly cloudy" ends up
    /// partly-cloudy rather than cloudy.
    const KEYWORDS: &'static [(&'static [&'static str], Self)] = &[
        (&["sunny", "clear"], Self::Clear),
        (&["cloud", "fog", "haze", "overcast"], Self::Cloudy),
        (&["partly"], Self::PartlyCloudy),
        (&["rain", "shower", "drizzle"], Self::Rain),
        (&["snow", "flurr", "sleet", "blizzard"], Self::Snow),
        (&["thunder"], Self::Thunder),
    ];

    /// Classify a short forecast ("Mostly Sunny", "Chance Rain Showers").
    /// Pure, but it scans the text for every keyword, so call it when the
    /// forecast changes rather than every frame.
    pub fn classify(text: &str, is_daytime: bool) -> Self {
        let text = text.to_lowercase();
        let category = Self::KEYWORDS
            .iter()
            .filter(|(keywords, _)| {
                keywords.iter().any(|keyword| text.contains(keyword))
            })
            .map(|(_, category)| *category)
            .last()
            .unwrap_or_default();

        if is_daytime {
            category
        } else {
            category.at_night()
        }
    }

    /// Night variant of this category, if it has one
    fn at_night(self) -> Self {
        match self {
            Self::Clear => Self::ClearNight,
            Self::PartlyCloudy => Self::CloudyNight,
            other => other,
        }
    }
}
