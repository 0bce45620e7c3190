use eframe::egui;

use crate::app::TramasApp;

impl TramasApp {
    pub(crate) fn draw_intro(&mut self, ui: &mut egui::Ui) {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.heading("A Trama dos Fios");
            ui.label(
                egui::RichText::new(
                    "As tecelagens de seda de Caxias do Sul — Panceri, Pompeia e \
                     Scavino & Bertuzzi",
                )
                .italics(),
            );
        });
        ui.add_space(16.0);
        ui.label(
            "Este arquivo reúne a pesquisa histórica sobre as famílias de tecelões \
             que, a partir do fim do século XIX, construíram a indústria de tecidos \
             de seda da região: de Joseph Panceri e seus teares de madeira na 6ª \
             Légua à Tecelagem Nossa Senhora de Pompeia de Luiz Pizzamiglio e à \
             sociedade Scavino & Bertuzzi.",
        );
        ui.add_space(8.0);
        ui.label(
            "Use as abas acima para percorrer a linha do tempo de cada família, ou \
             abra a Galeria para explorar os documentos e fotografias por tópico e \
             por tags. Cada imagem abre em um visualizador com zoom e navegação.",
        );
    }

    pub(crate) fn draw_about(&mut self, ui: &mut egui::Ui) {
        ui.add_space(24.0);
        ui.heading("Sobre a pesquisa");
        ui.add_space(8.0);
        ui.label(
            "Os eventos e imagens apresentados aqui foram levantados a partir de \
             jornais de época, documentos de família e acervos de museu. Cada \
             evento e cada imagem trazem sua corroboração: a indicação das fontes \
             que sustentam a informação.",
        );
        ui.add_space(8.0);
        ui.label(
            "Os dados são servidos por um servidor de conteúdo próprio e podem ser \
             atualizados de forma independente deste aplicativo.",
        );
    }
}
