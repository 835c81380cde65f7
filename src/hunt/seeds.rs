//! Canonical, compiled-in hunt content.
//!
//! `data/seeds/catalog.json` carries the same content so operators can edit
//! it without recompiling; these helpers are the fallback when no seed file
//! is configured.
use crate::hunt::badge::BadgeRule;
use crate::hunt::catalog::Catalog;
use crate::hunt::types::{Badge, Difficulty, Mission};

pub const FIRST_MISSION_ID: &str = "m001";
pub const SECOND_MISSION_ID: &str = "m002";
pub const STARTER_BADGE_ID: &str = "b001";
pub const DECODER_BADGE_ID: &str = "b002";
pub const ARCHITECT_BADGE_ID: &str = "b003";
pub const HUNTER_BADGE_ID: &str = "b004";
pub const ARCHITECT_LEVEL: u32 = 5;

pub const LEVEL_THRESHOLDS: [u32; 6] = [0, 100, 300, 600, 1000, 1500];

pub fn seed_missions() -> Vec<Mission> {
    vec![
        Mission::new(
            FIRST_MISSION_ID,
            "O Portal",
            "A chave de acesso está escondida onde o Sol nasce para um programador.",
            "Interceptamos uma página da web antiga que atua como um portal para a rede dos \
             Arquitetos. Eles deixaram uma mensagem escondida para quem sabe olhar além da \
             superfície. Inspecione o código-fonte e encontre a frase secreta.",
            Difficulty::Beginner,
            100,
            "o tempo esta a despertar",
            "Abra o link. Use \"Inspecionar Elemento\" ou \"Exibir Código Fonte\". Procure por \
             comentários HTML <!-- -->.",
            1,
        )
        .with_clue_url("https://github.com/google-gemini/codex-treasure-hunt/tree/main/portal-01"),
        Mission::new(
            SECOND_MISSION_ID,
            "Sussurros Binários",
            "Traduza a transmissão numérica para a linguagem humana.",
            "O Portal nos forneceu uma sequência de números binários. É um protocolo básico de \
             comunicação, mas essencial para entender como as máquinas falam. Decodifique a \
             mensagem para revelar o próximo alvo.",
            Difficulty::Beginner,
            150,
            "http",
            "Copie a sequência de 0s e 1s. Use uma ferramenta de tradução Binário para Texto \
             (ASCII).",
            1,
        )
        .with_clue_url(
            "https://github.com/google-gemini/codex-treasure-hunt/blob/main/pista-02/transmission.txt",
        ),
        Mission::new(
            "m003",
            "O Fragmento Perdido",
            "Reconstrua a função de navegação corrompida.",
            "Recuperamos fragmentos de um script vital do sistema de navegação da nave. O código \
             está quebrado em pedaços espalhados pelo repositório. Sua missão é montar a função \
             JavaScript corretamente para restaurar os motores.",
            Difficulty::Intermediate,
            300,
            "function soma(a,b){return a+b}",
            "A sintaxe correta de uma função requer a palavra chave function, parênteses para \
             argumentos e chaves para o corpo.",
            2,
        )
        .with_clue_url("https://github.com/google-gemini/codex-treasure-hunt/tree/main/fragment-hub"),
    ]
}

pub fn seed_badges() -> Vec<Badge> {
    vec![
        Badge::new(
            STARTER_BADGE_ID,
            "Iniciado",
            "🌱",
            "Completou o treinamento básico e abriu o Portal.",
        ),
        Badge::new(
            DECODER_BADGE_ID,
            "Criptógrafo",
            "🔓",
            "Quebrou a cifra binária com sucesso.",
        ),
        Badge::new(
            ARCHITECT_BADGE_ID,
            "Arquiteto",
            "🏗️",
            "Alcançou o nível 5 de acesso ao sistema.",
        ),
        Badge::new(
            HUNTER_BADGE_ID,
            "Caçador",
            "🧭",
            "Encontrou todas as pistas escondidas na web.",
        ),
    ]
}

/// Unlock rules for the canonical badges. The hunter badge has no trigger yet.
pub fn seed_badge_rules() -> Vec<BadgeRule> {
    vec![
        BadgeRule::on_mission(FIRST_MISSION_ID, STARTER_BADGE_ID),
        BadgeRule::on_mission(SECOND_MISSION_ID, DECODER_BADGE_ID),
        BadgeRule::on_level(ARCHITECT_LEVEL, ARCHITECT_BADGE_ID),
    ]
}

pub fn canonical_catalog() -> Catalog {
    Catalog::from_parts(
        seed_missions(),
        seed_badges(),
        LEVEL_THRESHOLDS.to_vec(),
        seed_badge_rules(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_catalog_is_valid() {
        let catalog = canonical_catalog();
        catalog.validate().unwrap();
        assert_eq!(catalog.missions().len(), 3);
        assert_eq!(catalog.badges().len(), 4);
        assert_eq!(catalog.threshold_for(1), 100);
    }

    #[test]
    fn hunter_badge_has_no_rule() {
        let rules = seed_badge_rules();
        assert!(rules.iter().all(|r| r.badge_id != HUNTER_BADGE_ID));
    }

    #[test]
    fn missions_are_in_display_order() {
        let ids: Vec<_> = seed_missions().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["m001", "m002", "m003"]);
    }
}
