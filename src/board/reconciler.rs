// src/board/reconciler.rs
//
// Liga o quadro ao endpoint de transição. O movimento local é aplicado na
// hora (atualização otimista), mas a chamada ao servidor é aguardada: se ela
// falhar, o movimento é desfeito e o erro volta para quem soltou o cartão,
// sem disparar e esquecer.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::board::{
    sensor::{DragOutcome, PointerSensor},
    BoardError, KanbanBoard,
};
use crate::models::request::Stage;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("falha de rede: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("transição rejeitada ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// O colaborador remoto que persiste a mudança de estágio.
#[async_trait]
pub trait TransitionGateway: Send + Sync {
    async fn submit(&self, request_id: Uuid, target: Stage) -> Result<(), GatewayError>;
}

#[async_trait]
impl<G: TransitionGateway + ?Sized> TransitionGateway for Arc<G> {
    async fn submit(&self, request_id: Uuid, target: Stage) -> Result<(), GatewayError> {
        (**self).submit(request_id, target).await
    }
}

/// Implementação HTTP: `POST /api/requests/{id}/stage` com `{"status": ...}`.
pub struct HttpTransitionGateway {
    base_url: String,
    bearer_token: Option<String>,
    client: reqwest::Client,
}

impl HttpTransitionGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
            client: reqwest::Client::new(),
        }
    }

    /// Token do provedor de identidade enviado em cada chamada.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[async_trait]
impl TransitionGateway for HttpTransitionGateway {
    async fn submit(&self, request_id: Uuid, target: Stage) -> Result<(), GatewayError> {
        let url = format!(
            "{}/api/requests/{}/stage",
            self.base_url.trim_end_matches('/'),
            request_id
        );

        let mut request = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "status": target }));
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status().as_u16();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => "resposta de erro sem corpo legível".to_string(),
        };

        Err(GatewayError::Rejected { status, message })
    }
}

/// Resultado consolidado de um gesto sobre o quadro.
#[derive(Debug)]
pub enum MoveResolution {
    /// Nada mudou: soltou fora de coluna, na própria coluna, ou gesto inativo.
    NoOp,
    /// Clique em um cartão parado: a UI navega para o detalhe.
    Navigate(Uuid),
    /// Movimento aplicado e aceito pelo servidor.
    Confirmed { request_id: Uuid, stage: Stage },
    /// Movimento desfeito; o erro vai para a notificação do usuário.
    Reverted {
        request_id: Uuid,
        stage: Stage,
        error: GatewayError,
    },
}

/// O controlador do quadro: sensor de arrasto + colunas + gateway.
pub struct BoardReconciler<G> {
    board: KanbanBoard,
    sensor: PointerSensor,
    gateway: G,
}

impl<G: TransitionGateway> BoardReconciler<G> {
    pub fn new(board: KanbanBoard, gateway: G) -> Self {
        Self {
            board,
            sensor: PointerSensor::new(),
            gateway,
        }
    }

    pub fn board(&self) -> &KanbanBoard {
        &self.board
    }

    pub fn is_dragging(&self) -> bool {
        self.sensor.is_dragging()
    }

    pub fn pointer_down(&mut self, request_id: Uuid, x: f64, y: f64) {
        self.sensor.pointer_down(request_id, x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.sensor.pointer_move(x, y)
    }

    /// Esc ou perda de captura: o gesto morre sem tocar nas colunas.
    pub fn cancel_drag(&mut self) {
        self.sensor.cancel();
    }

    /// Botão solto: resolve o gesto e, se houve movimento, persiste-o.
    pub async fn pointer_up(&mut self, over: Option<Stage>) -> Result<MoveResolution, BoardError> {
        match self.sensor.pointer_up(over) {
            None | Some(DragOutcome::Cancelled) => Ok(MoveResolution::NoOp),
            Some(DragOutcome::Clicked(request_id)) => Ok(MoveResolution::Navigate(request_id)),
            Some(DragOutcome::Dropped { request_id, target }) => match target {
                None => Ok(MoveResolution::NoOp),
                Some(dest) => self.apply_move(request_id, dest).await,
            },
        }
    }

    /// Movimento otimista seguido da confirmação do servidor.
    pub async fn apply_move(
        &mut self,
        request_id: Uuid,
        dest: Stage,
    ) -> Result<MoveResolution, BoardError> {
        let Some(move_id) = self.board.move_card(request_id, dest)? else {
            return Ok(MoveResolution::NoOp);
        };

        match self.gateway.submit(request_id, dest).await {
            Ok(()) => {
                self.board.confirm(move_id)?;
                Ok(MoveResolution::Confirmed {
                    request_id,
                    stage: dest,
                })
            }
            Err(error) => {
                let origin = self
                    .board
                    .pending_move(move_id)
                    .map(|m| m.from)
                    .unwrap_or(dest);
                self.board.revert(move_id)?;
                tracing::warn!(
                    "↩️ Movimento de {} para {} desfeito: {}",
                    request_id,
                    dest,
                    error
                );
                Ok(MoveResolution::Reverted {
                    request_id,
                    stage: origin,
                    error,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RequestCard;
    use crate::models::request::Priority;
    use std::sync::Mutex;

    struct RecordingGateway {
        calls: Mutex<Vec<(Uuid, Stage)>>,
        fail_with: Option<u16>,
    }

    impl RecordingGateway {
        fn accepting() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                fail_with: None,
            })
        }

        fn rejecting(status: u16) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(status),
            })
        }

        fn calls(&self) -> Vec<(Uuid, Stage)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TransitionGateway for RecordingGateway {
        async fn submit(&self, request_id: Uuid, target: Stage) -> Result<(), GatewayError> {
            self.calls.lock().unwrap().push((request_id, target));
            match self.fail_with {
                None => Ok(()),
                Some(status) => Err(GatewayError::Rejected {
                    status,
                    message: "recusado pelo servidor".to_string(),
                }),
            }
        }
    }

    fn card(id: Uuid, stage: Stage) -> RequestCard {
        RequestCard {
            id,
            subject: "bomba hidráulica".to_string(),
            priority: Priority::High,
            stage,
            equipment_name: None,
            assigned_to_name: None,
        }
    }

    fn reconciler_with(
        gateway: Arc<RecordingGateway>,
    ) -> (BoardReconciler<Arc<RecordingGateway>>, Vec<Uuid>) {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let board = KanbanBoard::from_requests(vec![
            card(ids[0], Stage::New),
            card(ids[1], Stage::New),
            card(ids[2], Stage::InProgress),
        ]);
        (BoardReconciler::new(board, gateway), ids)
    }

    #[tokio::test]
    async fn a_full_drag_moves_the_card_and_calls_the_endpoint() {
        let gateway = RecordingGateway::accepting();
        let (mut reconciler, ids) = reconciler_with(gateway.clone());

        reconciler.pointer_down(ids[1], 0.0, 0.0);
        assert!(reconciler.pointer_move(40.0, 0.0));
        let resolution = reconciler.pointer_up(Some(Stage::InProgress)).await.unwrap();

        assert!(matches!(
            resolution,
            MoveResolution::Confirmed { request_id, stage: Stage::InProgress } if request_id == ids[1]
        ));
        // A coluna de origem perde o cartão; o destino o recebe na frente
        assert_eq!(reconciler.board().column(Stage::New), &[ids[0]]);
        assert_eq!(
            reconciler.board().column(Stage::InProgress),
            &[ids[1], ids[2]]
        );
        assert_eq!(gateway.calls(), vec![(ids[1], Stage::InProgress)]);
        assert!(reconciler.board().partitions(&ids));
    }

    #[tokio::test]
    async fn a_short_press_navigates_without_moving_anything() {
        let gateway = RecordingGateway::accepting();
        let (mut reconciler, ids) = reconciler_with(gateway.clone());

        reconciler.pointer_down(ids[0], 0.0, 0.0);
        reconciler.pointer_move(2.0, 2.0);
        let resolution = reconciler.pointer_up(Some(Stage::Scrap)).await.unwrap();

        assert!(matches!(resolution, MoveResolution::Navigate(id) if id == ids[0]));
        assert_eq!(reconciler.board().column(Stage::New), &[ids[0], ids[1]]);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn dropping_outside_any_column_changes_nothing() {
        let gateway = RecordingGateway::accepting();
        let (mut reconciler, ids) = reconciler_with(gateway.clone());

        reconciler.pointer_down(ids[0], 0.0, 0.0);
        reconciler.pointer_move(30.0, 30.0);
        let resolution = reconciler.pointer_up(None).await.unwrap();

        assert!(matches!(resolution, MoveResolution::NoOp));
        assert_eq!(reconciler.board().column(Stage::New), &[ids[0], ids[1]]);
        assert!(gateway.calls().is_empty());
        assert!(reconciler.board().partitions(&ids));
    }

    #[tokio::test]
    async fn dropping_on_the_origin_column_skips_the_server() {
        let gateway = RecordingGateway::accepting();
        let (mut reconciler, ids) = reconciler_with(gateway.clone());

        reconciler.pointer_down(ids[1], 0.0, 0.0);
        reconciler.pointer_move(0.0, 50.0);
        let resolution = reconciler.pointer_up(Some(Stage::New)).await.unwrap();

        assert!(matches!(resolution, MoveResolution::NoOp));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn a_cancelled_gesture_leaves_the_columns_alone() {
        let gateway = RecordingGateway::accepting();
        let (mut reconciler, ids) = reconciler_with(gateway.clone());

        reconciler.pointer_down(ids[2], 0.0, 0.0);
        reconciler.pointer_move(100.0, 0.0);
        reconciler.cancel_drag();
        let resolution = reconciler.pointer_up(Some(Stage::Scrap)).await.unwrap();

        assert!(matches!(resolution, MoveResolution::NoOp));
        assert_eq!(reconciler.board().column(Stage::InProgress), &[ids[2]]);
        assert!(gateway.calls().is_empty());
        assert!(reconciler.board().partitions(&ids));
    }

    #[tokio::test]
    async fn a_rejected_transition_reverts_the_optimistic_move() {
        let gateway = RecordingGateway::rejecting(422);
        let (mut reconciler, ids) = reconciler_with(gateway.clone());

        let resolution = reconciler.apply_move(ids[1], Stage::Scrap).await.unwrap();

        match resolution {
            MoveResolution::Reverted {
                request_id,
                stage,
                error: GatewayError::Rejected { status, .. },
            } => {
                assert_eq!(request_id, ids[1]);
                assert_eq!(stage, Stage::New);
                assert_eq!(status, 422);
            }
            other => panic!("esperava Reverted, veio {other:?}"),
        }

        // As colunas voltaram ao estado anterior ao arrasto
        assert_eq!(reconciler.board().column(Stage::New), &[ids[0], ids[1]]);
        assert!(reconciler.board().column(Stage::Scrap).is_empty());
        assert_eq!(gateway.calls(), vec![(ids[1], Stage::Scrap)]);
        assert!(reconciler.board().partitions(&ids));
    }

    #[tokio::test]
    async fn repeating_a_move_to_the_same_column_is_a_noop() {
        let gateway = RecordingGateway::accepting();
        let (mut reconciler, ids) = reconciler_with(gateway.clone());

        reconciler.apply_move(ids[0], Stage::Repaired).await.unwrap();
        let second = reconciler.apply_move(ids[0], Stage::Repaired).await.unwrap();

        // O cartão já está lá: nada muda e nenhuma segunda chamada sai
        assert!(matches!(second, MoveResolution::NoOp));
        assert_eq!(gateway.calls(), vec![(ids[0], Stage::Repaired)]);
        assert!(reconciler.board().partitions(&ids));
    }

    #[tokio::test]
    async fn moves_apply_in_the_order_the_user_makes_them() {
        let gateway = RecordingGateway::accepting();
        let (mut reconciler, ids) = reconciler_with(gateway.clone());

        reconciler.apply_move(ids[0], Stage::InProgress).await.unwrap();
        reconciler.apply_move(ids[1], Stage::InProgress).await.unwrap();

        // O movido por último fica na frente
        assert_eq!(
            reconciler.board().column(Stage::InProgress),
            &[ids[1], ids[0], ids[2]]
        );
        assert_eq!(
            gateway.calls(),
            vec![(ids[0], Stage::InProgress), (ids[1], Stage::InProgress)]
        );
        assert!(reconciler.board().partitions(&ids));
    }
}
