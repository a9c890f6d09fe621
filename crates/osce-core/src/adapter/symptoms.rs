//! Static symptom → systems-review-subsection map.
//!
//! Keys are stored in normalized form (lowercase, no diacritics) and are
//! bilingual: case documents arrive in English or Spanish and both
//! spellings resolve to the same subsections. Extending coverage is a data
//! change — add a row here, nothing in the matching logic moves.

pub const CARDIOVASCULAR: &str = "Cardiovascular";
pub const RESPIRATORY: &str = "Respiratory";
pub const DIGESTIVE: &str = "Digestive";
pub const NEUROLOGICAL: &str = "Neurological";
pub const GENITOURINARY: &str = "Genitourinary";
pub const MUSCULOSKELETAL: &str = "Musculoskeletal";
pub const ENDOCRINE: &str = "Endocrine";
pub const DERMATOLOGICAL: &str = "Dermatological";
pub const HEMATOLOGICAL: &str = "Hematological";
pub const PSYCHIATRIC: &str = "Psychiatric";

pub(crate) static SYMPTOM_SUBSECTIONS: &[(&str, &[&str])] = &[
    // Cardiovascular
    ("chest pain", &[CARDIOVASCULAR, RESPIRATORY]),
    ("dolor toracico", &[CARDIOVASCULAR, RESPIRATORY]),
    ("retrosternal pain", &[CARDIOVASCULAR]),
    ("dolor retroesternal", &[CARDIOVASCULAR]),
    ("dolor opresivo", &[CARDIOVASCULAR]),
    ("precordial pain", &[CARDIOVASCULAR]),
    ("dolor precordial", &[CARDIOVASCULAR]),
    ("palpitations", &[CARDIOVASCULAR]),
    ("palpitaciones", &[CARDIOVASCULAR]),
    ("syncope", &[CARDIOVASCULAR, NEUROLOGICAL]),
    ("sincope", &[CARDIOVASCULAR, NEUROLOGICAL]),
    ("dizziness", &[NEUROLOGICAL, CARDIOVASCULAR]),
    ("mareo", &[NEUROLOGICAL, CARDIOVASCULAR]),
    ("edema", &[CARDIOVASCULAR]),
    ("edemas", &[CARDIOVASCULAR]),
    ("claudication", &[CARDIOVASCULAR]),
    ("claudicacion", &[CARDIOVASCULAR]),
    ("orthopnea", &[CARDIOVASCULAR, RESPIRATORY]),
    ("ortopnea", &[CARDIOVASCULAR, RESPIRATORY]),
    ("paroxysmal dyspnea", &[CARDIOVASCULAR, RESPIRATORY]),
    ("disnea paroxistica", &[CARDIOVASCULAR, RESPIRATORY]),
    ("dyspnea", &[CARDIOVASCULAR, RESPIRATORY]),
    ("disnea", &[CARDIOVASCULAR, RESPIRATORY]),
    ("shortness of breath", &[CARDIOVASCULAR, RESPIRATORY]),
    // Respiratory
    ("cough", &[RESPIRATORY]),
    ("tos", &[RESPIRATORY]),
    ("expectoration", &[RESPIRATORY]),
    ("expectoracion", &[RESPIRATORY]),
    ("hemoptysis", &[RESPIRATORY]),
    ("hemoptisis", &[RESPIRATORY]),
    ("wheezing", &[RESPIRATORY]),
    ("sibilancias", &[RESPIRATORY]),
    ("chest wall pain", &[RESPIRATORY]),
    ("dolor costal", &[RESPIRATORY]),
    // Digestive
    ("abdominal pain", &[DIGESTIVE]),
    ("dolor abdominal", &[DIGESTIVE]),
    ("nausea", &[DIGESTIVE]),
    ("nauseas", &[DIGESTIVE]),
    ("vomiting", &[DIGESTIVE]),
    ("vomitos", &[DIGESTIVE]),
    ("diarrhea", &[DIGESTIVE]),
    ("diarrea", &[DIGESTIVE]),
    ("constipation", &[DIGESTIVE]),
    ("estrenimiento", &[DIGESTIVE]),
    ("melena", &[DIGESTIVE]),
    ("melenas", &[DIGESTIVE]),
    ("hematochezia", &[DIGESTIVE]),
    ("hematoquecia", &[DIGESTIVE]),
    ("hematemesis", &[DIGESTIVE]),
    ("jaundice", &[DIGESTIVE]),
    ("ictericia", &[DIGESTIVE]),
    ("dysphagia", &[DIGESTIVE]),
    ("disfagia", &[DIGESTIVE]),
    ("heartburn", &[DIGESTIVE]),
    ("pirosis", &[DIGESTIVE]),
    ("reflux", &[DIGESTIVE]),
    ("reflujo", &[DIGESTIVE]),
    // Neurological
    ("headache", &[NEUROLOGICAL]),
    ("cefalea", &[NEUROLOGICAL]),
    ("vertigo", &[NEUROLOGICAL]),
    ("loss of consciousness", &[NEUROLOGICAL]),
    ("perdida de conciencia", &[NEUROLOGICAL]),
    ("confusion", &[NEUROLOGICAL]),
    ("seizures", &[NEUROLOGICAL]),
    ("convulsiones", &[NEUROLOGICAL]),
    ("paresis", &[NEUROLOGICAL]),
    ("paresia", &[NEUROLOGICAL]),
    ("paresthesia", &[NEUROLOGICAL]),
    ("parestesias", &[NEUROLOGICAL]),
    ("diplopia", &[NEUROLOGICAL]),
    ("dysarthria", &[NEUROLOGICAL]),
    ("disartria", &[NEUROLOGICAL]),
    // Genitourinary
    ("dysuria", &[GENITOURINARY]),
    ("disuria", &[GENITOURINARY]),
    ("urinary frequency", &[GENITOURINARY]),
    ("polaquiuria", &[GENITOURINARY]),
    ("hematuria", &[GENITOURINARY]),
    ("urinary incontinence", &[GENITOURINARY]),
    ("incontinencia urinaria", &[GENITOURINARY]),
    ("low back pain", &[GENITOURINARY]),
    ("dolor lumbar", &[GENITOURINARY]),
    ("testicular pain", &[GENITOURINARY]),
    ("dolor testicular", &[GENITOURINARY]),
    ("vaginal discharge", &[GENITOURINARY]),
    ("flujo vaginal", &[GENITOURINARY]),
    ("vaginal bleeding", &[GENITOURINARY]),
    ("sangrado vaginal", &[GENITOURINARY]),
    // Musculoskeletal
    ("joint pain", &[MUSCULOSKELETAL]),
    ("dolor articular", &[MUSCULOSKELETAL]),
    ("arthralgia", &[MUSCULOSKELETAL]),
    ("artralgia", &[MUSCULOSKELETAL]),
    ("myalgia", &[MUSCULOSKELETAL]),
    ("mialgia", &[MUSCULOSKELETAL]),
    ("joint stiffness", &[MUSCULOSKELETAL]),
    ("rigidez articular", &[MUSCULOSKELETAL]),
    ("joint swelling", &[MUSCULOSKELETAL]),
    ("inflamacion articular", &[MUSCULOSKELETAL]),
    ("limitacion funcional", &[MUSCULOSKELETAL]),
    // Endocrine
    ("polyuria", &[ENDOCRINE, GENITOURINARY]),
    ("poliuria", &[ENDOCRINE, GENITOURINARY]),
    ("polydipsia", &[ENDOCRINE]),
    ("polidipsia", &[ENDOCRINE]),
    ("polyphagia", &[ENDOCRINE]),
    ("polifagia", &[ENDOCRINE]),
    ("weight loss", &[ENDOCRINE]),
    ("perdida de peso", &[ENDOCRINE]),
    ("weight gain", &[ENDOCRINE]),
    ("ganancia de peso", &[ENDOCRINE]),
    ("cold intolerance", &[ENDOCRINE]),
    ("intolerancia al frio", &[ENDOCRINE]),
    ("heat intolerance", &[ENDOCRINE]),
    ("intolerancia al calor", &[ENDOCRINE]),
    ("night sweats", &[ENDOCRINE]),
    ("sudoracion nocturna", &[ENDOCRINE]),
    // Dermatological
    ("skin lesion", &[DERMATOLOGICAL]),
    ("lesion cutanea", &[DERMATOLOGICAL]),
    ("rash", &[DERMATOLOGICAL]),
    ("exantema", &[DERMATOLOGICAL]),
    ("pruritus", &[DERMATOLOGICAL]),
    ("prurito", &[DERMATOLOGICAL]),
    ("ulcer", &[DERMATOLOGICAL]),
    ("ulcera", &[DERMATOLOGICAL]),
    ("alopecia", &[DERMATOLOGICAL]),
    // Hematological
    ("bruising", &[HEMATOLOGICAL]),
    ("equimosis", &[HEMATOLOGICAL]),
    ("petechiae", &[HEMATOLOGICAL]),
    ("petequias", &[HEMATOLOGICAL]),
    ("hematomas", &[HEMATOLOGICAL]),
    ("bleeding", &[HEMATOLOGICAL]),
    ("sangrado", &[HEMATOLOGICAL]),
    ("anemia", &[HEMATOLOGICAL]),
    // Psychiatric
    ("anxiety", &[PSYCHIATRIC]),
    ("ansiedad", &[PSYCHIATRIC]),
    ("depression", &[PSYCHIATRIC]),
    ("depresion", &[PSYCHIATRIC]),
    ("insomnia", &[PSYCHIATRIC]),
    ("insomnio", &[PSYCHIATRIC]),
    ("low mood", &[PSYCHIATRIC]),
    ("animo bajo", &[PSYCHIATRIC]),
    ("suicidal thoughts", &[PSYCHIATRIC]),
    ("pensamientos suicidas", &[PSYCHIATRIC]),
    ("hallucinations", &[PSYCHIATRIC]),
    ("alucinaciones", &[PSYCHIATRIC]),
    ("delusions", &[PSYCHIATRIC]),
    ("delirios", &[PSYCHIATRIC]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique_and_normalized() {
        let mut seen = HashSet::new();
        for (key, subs) in SYMPTOM_SUBSECTIONS {
            assert!(seen.insert(*key), "duplicate symptom key '{key}'");
            assert_eq!(*key, crate::transcript::normalize(key), "key '{key}' not normalized");
            assert!(!subs.is_empty());
        }
    }

    #[test]
    fn spanish_and_english_spellings_agree() {
        let index: std::collections::HashMap<_, _> =
            SYMPTOM_SUBSECTIONS.iter().copied().collect();
        for (es, en) in [
            ("dolor toracico", "chest pain"),
            ("nauseas", "nausea"),
            ("mareo", "dizziness"),
            ("tos", "cough"),
        ] {
            assert_eq!(index[es], index[en]);
        }
    }
}
