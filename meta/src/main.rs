fn main() {
    multiversx_sc_meta_lib::cli_main::<gg_dao::AbiProvider>();
}
