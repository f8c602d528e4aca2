// src/common/notificador.rs

/// Acumula as mensagens de erro de negócio de UMA requisição.
///
/// Nada aqui falha nem interrompe o fluxo: o handler decide, no final,
/// se devolve os dados ou a lista de erros.
#[derive(Debug, Default, Clone)]
pub struct Notificador {
    notifications: Vec<String>,
}

impl Notificador {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(notificacao = %message, "Notificação registrada");
        self.notifications.push(message);
    }

    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let notificador = Notificador::new();
        assert!(!notificador.has_notifications());
        assert!(notificador.notifications().is_empty());
    }

    #[test]
    fn keeps_insertion_order() {
        let mut notificador = Notificador::new();
        notificador.notify("primeiro");
        notificador.notify(String::from("segundo"));

        assert!(notificador.has_notifications());
        assert_eq!(notificador.notifications(), ["primeiro", "segundo"]);
    }
}
