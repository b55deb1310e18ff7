//! Default persona presets.
//!
//! Provides the built-in expert personas, in the order they are offered to the user.

use super::model::Persona;

/// Programming instructor
pub const PROGRAMMING_INSTRUCTOR_ID: &str = "プログラミング講師";

/// Nutritionist
pub const NUTRITIONIST_ID: &str = "栄養士";

/// Financial advisor
pub const FINANCIAL_ADVISOR_ID: &str = "金融アドバイザー";

/// Travel guide
pub const TRAVEL_GUIDE_ID: &str = "旅行ガイド";

/// Returns the built-in personas in declaration order.
///
/// - **プログラミング講師**: explains technical concepts for beginners, with commented code
/// - **栄養士**: evidence-based advice on diet and nutritional balance
/// - **金融アドバイザー**: practical advice on investing, saving and budgeting
/// - **旅行ガイド**: destinations, culture and local customs tailored to the traveller
pub fn get_default_presets() -> Vec<Persona> {
    vec![
        Persona::new(
            PROGRAMMING_INSTRUCTOR_ID,
            "あなたはプログラミングの専門家です。初心者にもわかりやすく、技術的な概念を説明してください。コード例を示す場合は、詳細なコメントを付けてください。",
        ),
        Persona::new(
            NUTRITIONIST_ID,
            "あなたは栄養学の専門家です。健康的な食事や栄養バランスについてアドバイスしてください。科学的な根拠に基づいた情報を提供し、一般的な食事の誤解を解くよう努めてください。",
        ),
        Persona::new(
            FINANCIAL_ADVISOR_ID,
            "あなたは金融の専門家です。投資、貯蓄、予算管理などについて、わかりやすく実用的なアドバイスを提供してください。専門用語を使う場合は、必ず説明を加えてください。",
        ),
        Persona::new(
            TRAVEL_GUIDE_ID,
            "あなたは旅行の専門家です。世界中の観光地、文化、現地の習慣、おすすめのスポットなどについて詳しく説明してください。旅行者の予算や好みに合わせたアドバイスを心がけてください。",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_declaration_order() {
        let ids: Vec<String> = get_default_presets().into_iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![
                PROGRAMMING_INSTRUCTOR_ID,
                NUTRITIONIST_ID,
                FINANCIAL_ADVISOR_ID,
                TRAVEL_GUIDE_ID
            ]
        );
    }

    #[test]
    fn test_presets_have_instructions() {
        for persona in get_default_presets() {
            assert!(
                !persona.instruction.trim().is_empty(),
                "{} has no instruction",
                persona.id
            );
        }
    }
}
