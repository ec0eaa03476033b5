//! Prompt sent to the language model.

use super::ScheduleHints;

/// Build the single-turn instruction asking the model to turn `message`
/// into an intent object.
pub fn build_prompt(message: &str, hints: &ScheduleHints) -> String {
    let origin = &hints.origin;
    let destination = &hints.destination;

    let mut prompt = format!(
        "Analizá el siguiente pedido de horarios de micros y devolvé solo un objeto JSON.\n\
         - Si el usuario quiere ir a {destination}, \"direccion\" es \"Ida\".\n\
         - Si quiere ir a {origin} o irse de {destination}, \"direccion\" es \"Vuelta\".\n\
         - \"hora\" es la hora pedida en formato HH:MM; si dice \"ya\" o \"ahora\", es \"ahora\".\n\
         - \"accion\" es \"llegar\" si quiere llegar a una hora, o \"salir\" si quiere salir.\n\
         - Si menciona una línea de micro, ponela en \"micro_linea\".\n\
         - \"condicion_horario\" es \"cerca\" (\"a las\", \"alrededor de\"), \"antes_de\" o \"despues_de\"; \
         si no se indica, null.\n\
         - Si pide una cantidad de micros, ponela en \"cantidad\".\n\
         - Si pide el listado de todos, \"listado_completo\" es true.\n\
         Formato: {{\"direccion\": \"Ida\" | \"Vuelta\" | null, \"hora\": \"HH:MM\" | \"ahora\" | null, \
         \"accion\": \"llegar\" | \"salir\" | null, \"micro_linea\": string | null, \
         \"condicion_horario\": \"cerca\" | \"antes_de\" | \"despues_de\" | null, \
         \"cantidad\": number | null, \"listado_completo\": true | false}}\n\
         Si el pedido no es claro, devolvé {{\"error\": \"no_claro\"}}.\n"
    );

    if !hints.lines.is_empty() {
        prompt.push_str("Líneas disponibles: ");
        prompt.push_str(&hints.lines.join(", "));
        prompt.push('\n');
    }

    prompt.push_str("\nPedido: '");
    prompt.push_str(message);
    prompt.push('\'');
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> ScheduleHints {
        ScheduleHints::new("Rivadavia", "Facultad").with_lines(vec!["Ruta 60".into(), "Ruta 12".into()])
    }

    #[test]
    fn names_both_endpoints() {
        let prompt = build_prompt("quiero ir a la facultad", &hints());
        assert!(prompt.contains("ir a Facultad, \"direccion\" es \"Ida\""));
        assert!(prompt.contains("ir a Rivadavia o irse de Facultad, \"direccion\" es \"Vuelta\""));
    }

    #[test]
    fn ends_with_message() {
        let prompt = build_prompt("micros a las 15:00", &hints());
        assert!(prompt.ends_with("Pedido: 'micros a las 15:00'"));
    }

    #[test]
    fn lists_known_lines() {
        let prompt = build_prompt("hola", &hints());
        assert!(prompt.contains("Líneas disponibles: Ruta 60, Ruta 12"));

        let bare = build_prompt("hola", &ScheduleHints::new("A", "B"));
        assert!(!bare.contains("Líneas disponibles"));
    }

    #[test]
    fn describes_error_escape() {
        let prompt = build_prompt("hola", &hints());
        assert!(prompt.contains("{\"error\": \"no_claro\"}"));
    }
}
