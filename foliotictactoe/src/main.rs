use foliotictactoe::TicTacToeApp;

fn main() -> eframe::Result<()> {
    let settings = foliocore::boot("foliotictactoe");

    let options = foliocore::native_options("Tic Tac Toe", [420.0, 620.0]);
    eframe::run_native("Tic Tac Toe", options, Box::new(move |cc| {
        foliocore::FolioTheme::default().apply(&cc.egui_ctx);
        Box::new(TicTacToeApp::new(&settings))
    }))
}
