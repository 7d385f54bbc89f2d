mod ais;
