// src/board/mod.rs
//
// O modelo de colunas do quadro kanban. É estado derivado e efêmero: nasce da
// lista de requisições carregada, muda apenas pelos movimentos de arrasto e
// nunca é fonte de verdade: um recarregamento reconstrói tudo do servidor.

pub mod reconciler;
pub mod sensor;

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::models::request::{Priority, RequestSummary, Stage};

/// O que o quadro precisa saber de cada cartão para desenhar e navegar.
#[derive(Debug, Clone)]
pub struct RequestCard {
    pub id: Uuid,
    pub subject: String,
    pub priority: Priority,
    pub stage: Stage,
    pub equipment_name: Option<String>,
    pub assigned_to_name: Option<String>,
}

impl From<&RequestSummary> for RequestCard {
    fn from(summary: &RequestSummary) -> Self {
        Self {
            id: summary.id,
            subject: summary.subject.clone(),
            priority: summary.priority,
            stage: summary.stage,
            equipment_name: summary.equipment_name.clone(),
            assigned_to_name: summary.assigned_to_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    Pending,
    Confirmed,
    Failed,
}

/// Movimento otimista já aplicado às colunas, aguardando o servidor.
#[derive(Debug, Clone)]
pub struct PendingMove {
    pub id: u64,
    pub request_id: Uuid,
    pub from: Stage,
    pub to: Stage,
    pub status: MoveStatus,
    origin_index: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("cartão desconhecido no quadro: {0}")]
    UnknownCard(Uuid),
    #[error("movimento desconhecido: {0}")]
    UnknownMove(u64),
}

pub struct KanbanBoard {
    // Uma pista por estágio, na ordem de Stage::ALL
    lanes: [Vec<Uuid>; 4],
    cards: HashMap<Uuid, RequestCard>,
    moves: HashMap<u64, PendingMove>,
    next_move_id: u64,
}

impl KanbanBoard {
    /// Particiona a lista carregada nas quatro colunas, preservando a ordem
    /// de chegada. Ids repetidos ficam com a primeira ocorrência, mantendo o
    /// invariante de partição.
    pub fn from_requests<I>(requests: I) -> Self
    where
        I: IntoIterator<Item = RequestCard>,
    {
        let mut board = Self {
            lanes: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
            cards: HashMap::new(),
            moves: HashMap::new(),
            next_move_id: 0,
        };

        for card in requests {
            if board.cards.contains_key(&card.id) {
                continue;
            }
            board.lanes[card.stage.index()].push(card.id);
            board.cards.insert(card.id, card);
        }

        board
    }

    pub fn column(&self, stage: Stage) -> &[Uuid] {
        &self.lanes[stage.index()]
    }

    /// Contagem por coluna, para os cabeçalhos do quadro.
    pub fn counts(&self) -> [(Stage, usize); 4] {
        [
            (Stage::New, self.lanes[0].len()),
            (Stage::InProgress, self.lanes[1].len()),
            (Stage::Repaired, self.lanes[2].len()),
            (Stage::Scrap, self.lanes[3].len()),
        ]
    }

    pub fn card(&self, id: Uuid) -> Option<&RequestCard> {
        self.cards.get(&id)
    }

    pub fn stage_of(&self, id: Uuid) -> Option<Stage> {
        self.cards.get(&id).map(|card| card.stage)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pending_move(&self, move_id: u64) -> Option<&PendingMove> {
        self.moves.get(&move_id)
    }

    /// Aplica um movimento otimista: remove da coluna de origem e coloca na
    /// frente da coluna de destino ("movido mais recentemente primeiro").
    ///
    /// Devolve `None` quando soltar na própria coluna, quando nada muda e nenhuma
    /// chamada ao servidor deve ser feita.
    pub fn move_card(&mut self, request_id: Uuid, dest: Stage) -> Result<Option<u64>, BoardError> {
        let origin = self
            .stage_of(request_id)
            .ok_or(BoardError::UnknownCard(request_id))?;

        if origin == dest {
            return Ok(None);
        }

        let lane = &mut self.lanes[origin.index()];
        let origin_index = lane
            .iter()
            .position(|id| *id == request_id)
            .ok_or(BoardError::UnknownCard(request_id))?;
        lane.remove(origin_index);

        self.lanes[dest.index()].insert(0, request_id);

        if let Some(card) = self.cards.get_mut(&request_id) {
            card.stage = dest;
        }

        let move_id = self.next_move_id;
        self.next_move_id += 1;
        self.moves.insert(
            move_id,
            PendingMove {
                id: move_id,
                request_id,
                from: origin,
                to: dest,
                status: MoveStatus::Pending,
                origin_index,
            },
        );

        Ok(Some(move_id))
    }

    /// O servidor aceitou a transição: o movimento deixa de ser provisório.
    pub fn confirm(&mut self, move_id: u64) -> Result<(), BoardError> {
        let mv = self
            .moves
            .get_mut(&move_id)
            .ok_or(BoardError::UnknownMove(move_id))?;
        mv.status = MoveStatus::Confirmed;
        Ok(())
    }

    /// O servidor recusou (ou a rede falhou): desfaz o movimento otimista,
    /// devolvendo o cartão à posição de origem. Se o cartão já foi movido de
    /// novo desde então, o estado mais recente prevalece e só o registro do
    /// movimento é marcado como falho.
    pub fn revert(&mut self, move_id: u64) -> Result<(), BoardError> {
        let mv = self
            .moves
            .get(&move_id)
            .cloned()
            .ok_or(BoardError::UnknownMove(move_id))?;

        if mv.status != MoveStatus::Pending {
            return Ok(());
        }

        let dest = &mut self.lanes[mv.to.index()];
        if let Some(pos) = dest.iter().position(|id| *id == mv.request_id) {
            dest.remove(pos);

            let origin = &mut self.lanes[mv.from.index()];
            let insert_at = mv.origin_index.min(origin.len());
            origin.insert(insert_at, mv.request_id);

            if let Some(card) = self.cards.get_mut(&mv.request_id) {
                card.stage = mv.from;
            }
        }

        if let Some(entry) = self.moves.get_mut(&move_id) {
            entry.status = MoveStatus::Failed;
        }

        Ok(())
    }

    /// Invariante de partição: cada id carregado aparece em exatamente uma
    /// coluna, sem perdas nem duplicatas.
    pub fn partitions(&self, ids: &[Uuid]) -> bool {
        let mut seen: HashMap<Uuid, usize> = HashMap::new();
        for lane in &self.lanes {
            for id in lane {
                *seen.entry(*id).or_insert(0) += 1;
            }
        }

        ids.len() == seen.len()
            && ids.iter().all(|id| seen.get(id) == Some(&1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: Uuid, stage: Stage) -> RequestCard {
        RequestCard {
            id,
            subject: format!("requisicao {id}"),
            priority: Priority::Medium,
            stage,
            equipment_name: None,
            assigned_to_name: None,
        }
    }

    fn sample_board() -> (KanbanBoard, Vec<Uuid>) {
        let ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        let board = KanbanBoard::from_requests(vec![
            card(ids[0], Stage::New),
            card(ids[1], Stage::New),
            card(ids[2], Stage::InProgress),
            card(ids[3], Stage::Repaired),
            card(ids[4], Stage::Scrap),
        ]);
        (board, ids)
    }

    #[test]
    fn builds_the_partition_from_the_loaded_list() {
        let (board, ids) = sample_board();

        assert_eq!(board.column(Stage::New), &[ids[0], ids[1]]);
        assert_eq!(board.column(Stage::InProgress), &[ids[2]]);
        assert_eq!(board.column(Stage::Repaired), &[ids[3]]);
        assert_eq!(board.column(Stage::Scrap), &[ids[4]]);
        assert!(board.partitions(&ids));
    }

    #[test]
    fn duplicate_ids_keep_the_first_occurrence() {
        let id = Uuid::new_v4();
        let board =
            KanbanBoard::from_requests(vec![card(id, Stage::New), card(id, Stage::Repaired)]);

        assert_eq!(board.column(Stage::New), &[id]);
        assert!(board.column(Stage::Repaired).is_empty());
        assert!(board.partitions(&[id]));
    }

    #[test]
    fn move_prepends_to_the_destination_column() {
        let (mut board, ids) = sample_board();

        let move_id = board.move_card(ids[1], Stage::InProgress).unwrap();
        assert!(move_id.is_some());

        assert_eq!(board.column(Stage::New), &[ids[0]]);
        // O cartão movido entra na frente do que já estava lá
        assert_eq!(board.column(Stage::InProgress), &[ids[1], ids[2]]);
        assert_eq!(board.stage_of(ids[1]), Some(Stage::InProgress));
        assert!(board.partitions(&ids));
    }

    #[test]
    fn dropping_on_the_origin_column_is_a_noop() {
        let (mut board, ids) = sample_board();

        let move_id = board.move_card(ids[0], Stage::New).unwrap();
        assert_eq!(move_id, None);
        assert_eq!(board.column(Stage::New), &[ids[0], ids[1]]);
        assert!(board.partitions(&ids));
    }

    #[test]
    fn unknown_card_is_rejected() {
        let (mut board, _) = sample_board();
        let ghost = Uuid::new_v4();

        assert_eq!(
            board.move_card(ghost, Stage::Scrap),
            Err(BoardError::UnknownCard(ghost))
        );
    }

    #[test]
    fn revert_restores_the_origin_position() {
        let (mut board, ids) = sample_board();

        let move_id = board.move_card(ids[1], Stage::Scrap).unwrap().unwrap();
        assert_eq!(board.column(Stage::Scrap), &[ids[1], ids[4]]);

        board.revert(move_id).unwrap();

        assert_eq!(board.column(Stage::New), &[ids[0], ids[1]]);
        assert_eq!(board.column(Stage::Scrap), &[ids[4]]);
        assert_eq!(board.stage_of(ids[1]), Some(Stage::New));
        assert_eq!(
            board.pending_move(move_id).map(|m| m.status),
            Some(MoveStatus::Failed)
        );
        assert!(board.partitions(&ids));
    }

    #[test]
    fn revert_after_a_newer_move_keeps_the_latest_state() {
        let (mut board, ids) = sample_board();

        let first = board.move_card(ids[0], Stage::InProgress).unwrap().unwrap();
        let _second = board.move_card(ids[0], Stage::Repaired).unwrap().unwrap();

        // O primeiro movimento falhou, mas o cartão já está em outra coluna:
        // o estado mais novo vence e nada se duplica.
        board.revert(first).unwrap();

        assert_eq!(board.stage_of(ids[0]), Some(Stage::Repaired));
        assert!(board.partitions(&ids));
    }

    #[test]
    fn confirm_marks_the_move_as_settled() {
        let (mut board, ids) = sample_board();

        let move_id = board.move_card(ids[2], Stage::Repaired).unwrap().unwrap();
        board.confirm(move_id).unwrap();

        assert_eq!(
            board.pending_move(move_id).map(|m| m.status),
            Some(MoveStatus::Confirmed)
        );
        // Reverter um movimento já confirmado não mexe nas colunas
        board.revert(move_id).unwrap();
        assert_eq!(board.stage_of(ids[2]), Some(Stage::Repaired));
        assert!(board.partitions(&ids));
    }

    #[test]
    fn partition_survives_any_sequence_of_moves() {
        let (mut board, ids) = sample_board();

        let m1 = board.move_card(ids[0], Stage::Scrap).unwrap().unwrap();
        board.move_card(ids[3], Stage::New).unwrap().unwrap();
        let m3 = board.move_card(ids[4], Stage::InProgress).unwrap().unwrap();
        board.move_card(ids[2], Stage::InProgress).unwrap();
        board.revert(m1).unwrap();
        board.confirm(m3).unwrap();
        board.move_card(ids[0], Stage::Repaired).unwrap().unwrap();

        assert!(board.partitions(&ids));
        let total: usize = board.counts().iter().map(|(_, n)| n).sum();
        assert_eq!(total, ids.len());
    }
}
