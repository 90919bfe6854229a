//! City recognition shared by the travel tools.

/// Cities the built-in tables know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum City {
    Beijing,
    Shanghai,
    Guangzhou,
    Shenzhen,
    Chengdu,
    Hangzhou,
}

impl City {
    pub const ALL: [City; 6] = [
        City::Beijing,
        City::Shanghai,
        City::Guangzhou,
        City::Shenzhen,
        City::Chengdu,
        City::Hangzhou,
    ];

    /// English name.
    pub fn name(self) -> &'static str {
        match self {
            City::Beijing => "Beijing",
            City::Shanghai => "Shanghai",
            City::Guangzhou => "Guangzhou",
            City::Shenzhen => "Shenzhen",
            City::Chengdu => "Chengdu",
            City::Hangzhou => "Hangzhou",
        }
    }

    /// Chinese name.
    pub fn local_name(self) -> &'static str {
        match self {
            City::Beijing => "北京",
            City::Shanghai => "上海",
            City::Guangzhou => "广州",
            City::Shenzhen => "深圳",
            City::Chengdu => "成都",
            City::Hangzhou => "杭州",
        }
    }

    /// "Beijing (北京)"
    pub fn label(self) -> String {
        format!("{} ({})", self.name(), self.local_name())
    }

    /// The city mentioned earliest in `query`, if any.
    ///
    /// English names match case-insensitively; Chinese names match verbatim.
    pub fn find_in(query: &str) -> Option<City> {
        let lowered = query.to_lowercase();
        City::ALL
            .into_iter()
            .filter_map(|city| {
                let english = lowered.find(&city.name().to_lowercase());
                let local = query.find(city.local_name());
                english.into_iter().chain(local).min().map(|pos| (pos, city))
            })
            .min()
            .map(|(_, city)| city)
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
