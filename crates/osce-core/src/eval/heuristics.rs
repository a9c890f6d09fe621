//! Cross-reference heuristics for the handful of items where the question
//! can be inferred from the patient's answer (the patient only volunteers
//! habits, family events, chronic conditions or medication when asked).
//!
//! The whole exception list lives in one table keyed by item id. Lexicon
//! hits are substring containment over normalized text; prefix forms like
//! "cigarr" are deliberate.

static HABIT_QUESTION: &[&str] = &[
    "habitos", "consumo", "fumas", "fumar", "tabaco", "alcohol", "bebes", "bebe", "beber",
    "drogas",
];

static SMOKING_PATIENT: &[&str] = &[
    "fumo", "fumador", "fumadora", "cigarr", "tabaco", "paquete", "pitillo",
];

static FAMILY_QUESTION: &[&str] = &[
    "antecedentes familiares", "familia", "familiares", "padre", "madre", "hermano", "hermana",
];

static FAMILY_PATIENT: &[&str] = &["padre", "madre", "hermano", "hermana", "familia", "familiar"];

static FAMILY_EVENT: &[&str] = &["infarto", "cardiaco", "cardiaca", "muerte", "fallecio"];

static CHRONIC_QUESTION: &[&str] = &[
    "enfermedades cronicas", "enfermedades personales", "antecedentes personales",
    "problemas de salud",
];

static CHRONIC_PATIENT: &[&str] = &[
    "hta", "hipertension", "tension alta", "diabetes", "colesterol", "dislipemia",
];

static MEDICATION_QUESTION: &[&str] = &["medicacion", "tratamiento", "pastillas", "tomas", "toma"];

static MEDICATION_PATIENT: &[&str] = &[
    "enalapril", "atorvastatina", "atorcan", "estatinas", "statina", "medicacion", "tomo",
];

/// One cross-reference rule: the examinee must have asked (one lexicon) and
/// the patient must have answered (every group hit at least once).
pub(crate) struct CrossReference {
    pub name: &'static str,
    pub examinee_any: &'static [&'static str],
    pub patient_groups: &'static [&'static [&'static str]],
}

impl CrossReference {
    pub fn matches(&self, examinee_text: &str, patient_text: &str) -> bool {
        contains_any(examinee_text, self.examinee_any)
            && self
                .patient_groups
                .iter()
                .all(|group| contains_any(patient_text, group))
    }
}

pub(crate) static CROSS_REFERENCES: &[(&str, CrossReference)] = &[
    (
        "SOC_SMOKING",
        CrossReference {
            name: "smoking_habits",
            examinee_any: HABIT_QUESTION,
            patient_groups: &[SMOKING_PATIENT],
        },
    ),
    (
        "FAM_HISTORY",
        CrossReference {
            name: "family_history",
            examinee_any: FAMILY_QUESTION,
            patient_groups: &[FAMILY_PATIENT, FAMILY_EVENT],
        },
    ),
    (
        "PMH_CHRONIC",
        CrossReference {
            name: "chronic_conditions",
            examinee_any: CHRONIC_QUESTION,
            patient_groups: &[CHRONIC_PATIENT],
        },
    ),
    (
        "MED_CURRENT",
        CrossReference {
            name: "current_medication",
            examinee_any: MEDICATION_QUESTION,
            patient_groups: &[MEDICATION_PATIENT],
        },
    ),
];

pub(crate) fn cross_reference_for(item_id: &str) -> Option<&'static CrossReference> {
    CROSS_REFERENCES
        .iter()
        .find(|(id, _)| *id == item_id)
        .map(|(_, rule)| rule)
}

fn contains_any(text: &str, phrases: &[&str]) -> bool {
    !text.is_empty() && phrases.iter().any(|p| text.contains(p))
}
