use serde::{Deserialize, Serialize};

/// Workout program assigned to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub name: String,
}

impl Routine {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Illustration for this routine, if its name can be classified
    pub fn art(&self) -> Option<RoutineArt> {
        RoutineArt::for_routine_name(&self.name)
    }
}

/// Body area a routine trains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyFocus {
    FullBody,
}

/// Experience level a routine targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Illustration shown next to an assigned routine.
///
/// Each variant is one supported (body focus, level) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutineArt {
    FullBodyBeginner,
    FullBodyIntermediate,
    FullBodyAdvanced,
}

impl RoutineArt {
    /// Look up the illustration for a normalized (body focus, level) pair
    pub fn lookup(focus: BodyFocus, level: SkillLevel) -> Option<Self> {
        match (focus, level) {
            (BodyFocus::FullBody, SkillLevel::Beginner) => Some(RoutineArt::FullBodyBeginner),
            (BodyFocus::FullBody, SkillLevel::Intermediate) => {
                Some(RoutineArt::FullBodyIntermediate)
            }
            (BodyFocus::FullBody, SkillLevel::Advanced) => Some(RoutineArt::FullBodyAdvanced),
        }
    }

    /// Classify a routine name and look up its illustration
    pub fn for_routine_name(name: &str) -> Option<Self> {
        let (focus, level) = classify(name)?;
        Self::lookup(focus, level)
    }

    /// Asset path relative to the asset base URL
    pub fn asset_path(&self) -> &'static str {
        match self {
            RoutineArt::FullBodyBeginner => "multimedia/images/routines/beginner/beginner.jpg",
            RoutineArt::FullBodyIntermediate => {
                "multimedia/images/routines/intermediate/intermediate.jpg"
            }
            RoutineArt::FullBodyAdvanced => "multimedia/images/routines/advance/advanced.jpg",
        }
    }

    /// Full asset URL under `base`
    pub fn asset_url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.asset_path())
    }
}

/// Normalize a routine name into its (body focus, level) pair
pub fn classify(name: &str) -> Option<(BodyFocus, SkillLevel)> {
    let normalized = fold_accents(&name.to_lowercase());

    let focus = if normalized.contains("cuerpo completo") || normalized.contains("full body") {
        BodyFocus::FullBody
    } else {
        return None;
    };

    let level = if normalized.contains("principiante") || normalized.contains("beginner") {
        SkillLevel::Beginner
    } else if normalized.contains("intermedio") || normalized.contains("intermediate") {
        SkillLevel::Intermediate
    } else if normalized.contains("avanzado") || normalized.contains("advanced") {
        SkillLevel::Advanced
    } else {
        return None;
    };

    Some((focus, level))
}

/// Replace Spanish accented vowels with their plain forms
pub(crate) fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' => 'a',
            'é' | 'è' => 'e',
            'í' | 'ì' => 'i',
            'ó' | 'ò' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' | 'Ü' => 'U',
            other => other,
        })
        .collect()
}
