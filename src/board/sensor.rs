// src/board/sensor.rs

use uuid::Uuid;

use crate::models::request::Stage;

/// Distância mínima do ponteiro antes de reconhecermos um arrasto.
/// Abaixo disso, soltar o botão é um clique e navega para o detalhe.
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum SensorState {
    Idle,
    /// Botão pressionado sobre um cartão, ainda sem passar do limiar.
    Armed { request_id: Uuid, x: f64, y: f64 },
    Dragging { request_id: Uuid },
}

/// Desfecho de um gesto de ponteiro sobre o quadro.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Soltou antes do limiar: clique, navega para o detalhe da requisição.
    Clicked(Uuid),
    /// Arrasto completo; `target` é a coluna sob o ponteiro, se houver.
    Dropped {
        request_id: Uuid,
        target: Option<Stage>,
    },
    /// Gesto interrompido no meio (tecla Esc, perda de captura).
    Cancelled,
}

/// Reconhecedor de arrasto: distingue cliques de arrastos pela distância
/// percorrida antes de soltar.
#[derive(Debug, Clone)]
pub struct PointerSensor {
    activation_distance: f64,
    state: SensorState,
}

impl Default for PointerSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerSensor {
    pub fn new() -> Self {
        Self::with_activation_distance(DEFAULT_ACTIVATION_DISTANCE)
    }

    pub fn with_activation_distance(activation_distance: f64) -> Self {
        Self {
            activation_distance,
            state: SensorState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SensorState::Dragging { .. })
    }

    /// Botão pressionado sobre um cartão. Um gesto anterior inacabado é
    /// descartado.
    pub fn pointer_down(&mut self, request_id: Uuid, x: f64, y: f64) {
        self.state = SensorState::Armed { request_id, x, y };
    }

    /// Movimento do ponteiro. Devolve `true` enquanto um arrasto está ativo.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if let SensorState::Armed {
            request_id,
            x: origin_x,
            y: origin_y,
        } = self.state
        {
            let distance = (x - origin_x).hypot(y - origin_y);
            if distance >= self.activation_distance {
                self.state = SensorState::Dragging { request_id };
            }
        }
        self.is_dragging()
    }

    /// Botão solto. `over` é a coluna sob o ponteiro, se o ponteiro estiver
    /// sobre alguma.
    pub fn pointer_up(&mut self, over: Option<Stage>) -> Option<DragOutcome> {
        let outcome = match self.state {
            SensorState::Idle => None,
            SensorState::Armed { request_id, .. } => Some(DragOutcome::Clicked(request_id)),
            SensorState::Dragging { request_id } => Some(DragOutcome::Dropped {
                request_id,
                target: over,
            }),
        };
        self.state = SensorState::Idle;
        outcome
    }

    /// Cancela o gesto em andamento sem produzir movimento.
    pub fn cancel(&mut self) -> Option<DragOutcome> {
        let outcome = match self.state {
            SensorState::Idle => None,
            _ => Some(DragOutcome::Cancelled),
        };
        self.state = SensorState::Idle;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_short_press_is_a_click() {
        let mut sensor = PointerSensor::new();
        let id = Uuid::new_v4();

        sensor.pointer_down(id, 10.0, 10.0);
        assert!(!sensor.pointer_move(13.0, 13.0)); // ~4.2 < 6
        let outcome = sensor.pointer_up(Some(Stage::Scrap));

        assert_eq!(outcome, Some(DragOutcome::Clicked(id)));
    }

    #[test]
    fn crossing_the_threshold_turns_into_a_drag() {
        let mut sensor = PointerSensor::new();
        let id = Uuid::new_v4();

        sensor.pointer_down(id, 0.0, 0.0);
        assert!(!sensor.pointer_move(3.0, 0.0));
        assert!(sensor.pointer_move(6.0, 0.0)); // exatamente no limiar
        let outcome = sensor.pointer_up(Some(Stage::InProgress));

        assert_eq!(
            outcome,
            Some(DragOutcome::Dropped {
                request_id: id,
                target: Some(Stage::InProgress),
            })
        );
    }

    #[test]
    fn dropping_outside_any_column_has_no_target() {
        let mut sensor = PointerSensor::new();
        let id = Uuid::new_v4();

        sensor.pointer_down(id, 0.0, 0.0);
        sensor.pointer_move(0.0, 20.0);
        let outcome = sensor.pointer_up(None);

        assert_eq!(
            outcome,
            Some(DragOutcome::Dropped {
                request_id: id,
                target: None,
            })
        );
    }

    #[test]
    fn cancel_discards_the_gesture() {
        let mut sensor = PointerSensor::new();
        let id = Uuid::new_v4();

        sensor.pointer_down(id, 0.0, 0.0);
        sensor.pointer_move(50.0, 0.0);
        assert_eq!(sensor.cancel(), Some(DragOutcome::Cancelled));

        // Depois do cancelamento não sobra gesto nenhum
        assert_eq!(sensor.pointer_up(Some(Stage::New)), None);
        assert_eq!(sensor.cancel(), None);
    }
}
