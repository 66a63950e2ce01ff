//! Generación de tokens de sesión de aparcamiento
//!
//! El token es lo que se imprime en el ticket y se escanea en la salida.

use rand::distributions::Alphanumeric;
use rand::Rng;

const TOKEN_PREFIX: &str = "PK";
const TOKEN_RANDOM_LEN: usize = 10;

/// Token en mayúsculas: prefijo + 10 caracteres alfanuméricos
pub fn generate_session_token() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{}{}", TOKEN_PREFIX, random.to_uppercase())
}
