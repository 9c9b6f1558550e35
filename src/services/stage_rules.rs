// src/services/stage_rules.rs
//
// As regras do ciclo de vida ficam todas aqui: a política de transição é um
// objeto trocável e os efeitos colaterais são uma tabela declarativa por
// estágio de destino, executada depois da escrita primária na mesma transação.

use uuid::Uuid;

use crate::models::request::Stage;

/// Decide quais mudanças de estágio são aceitas.
pub trait TransitionPolicy: Send + Sync {
    fn allows(&self, from: Stage, to: Stage) -> bool;
}

/// Comportamento atual do produto: qualquer estágio pode ir para qualquer
/// outro, inclusive para trás e para si mesmo (corrige cliques errados).
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveTransitions;

impl TransitionPolicy for PermissiveTransitions {
    fn allows(&self, _from: Stage, _to: Stage) -> bool {
        true
    }
}

/// Alternativa mais rígida: o ciclo de vida só anda para frente.
/// Repetir o estágio atual continua valendo (reaplicação é inofensiva).
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardOnlyTransitions;

impl ForwardOnlyTransitions {
    fn rank(stage: Stage) -> u8 {
        match stage {
            Stage::New => 0,
            Stage::InProgress => 1,
            // 'repaired' e 'scrap' são desfechos alternativos de mesmo nível
            Stage::Repaired | Stage::Scrap => 2,
        }
    }
}

impl TransitionPolicy for ForwardOnlyTransitions {
    fn allows(&self, from: Stage, to: Stage) -> bool {
        from == to || Self::rank(to) > Self::rank(from)
    }
}

/// Efeitos colaterais disparados por um estágio de destino.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEffect {
    /// Sucateia o equipamento vinculado (status, nota e data).
    ScrapEquipment,
}

/// A tabela estágio -> efeitos. Hoje só 'scrap' tem efeito.
pub fn stage_effects(target: Stage) -> &'static [StageEffect] {
    match target {
        Stage::Scrap => &[StageEffect::ScrapEquipment],
        Stage::New | Stage::InProgress | Stage::Repaired => &[],
    }
}

/// Nota gravada no equipamento sucateado, apontando a requisição de origem.
pub fn scrap_note_for(request_id: Uuid) -> String {
    format!("Scrapped via maintenance request {}", request_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_policy_accepts_every_pair() {
        let policy = PermissiveTransitions;
        for from in Stage::ALL {
            for to in Stage::ALL {
                assert!(policy.allows(from, to), "{from} -> {to} deveria passar");
            }
        }
    }

    #[test]
    fn forward_only_blocks_backwards_moves() {
        let policy = ForwardOnlyTransitions;

        assert!(policy.allows(Stage::New, Stage::InProgress));
        assert!(policy.allows(Stage::New, Stage::Repaired));
        assert!(policy.allows(Stage::InProgress, Stage::Scrap));

        assert!(!policy.allows(Stage::Repaired, Stage::New));
        assert!(!policy.allows(Stage::InProgress, Stage::New));
        assert!(!policy.allows(Stage::Repaired, Stage::Scrap));
        assert!(!policy.allows(Stage::Scrap, Stage::Repaired));
    }

    #[test]
    fn forward_only_keeps_self_transitions() {
        let policy = ForwardOnlyTransitions;
        for stage in Stage::ALL {
            assert!(policy.allows(stage, stage));
        }
    }

    #[test]
    fn only_scrap_has_effects() {
        assert_eq!(stage_effects(Stage::Scrap), &[StageEffect::ScrapEquipment]);
        assert!(stage_effects(Stage::New).is_empty());
        assert!(stage_effects(Stage::InProgress).is_empty());
        assert!(stage_effects(Stage::Repaired).is_empty());
    }

    #[test]
    fn scrap_note_references_the_request() {
        let id = Uuid::new_v4();
        let note = scrap_note_for(id);
        assert_eq!(note, format!("Scrapped via maintenance request {}", id));
        assert!(note.contains(&id.to_string()));
    }
}
